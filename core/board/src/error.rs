//! 錯誤處理系統
//!
//! 分層：各領域各自一個 enum，頂層 `Error` 保留 context 鏈。
//! 所有錯誤都是 fail fast，這一層不做任何恢復。

use crate::alias::{CellIndex, Coord};
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Animation(#[from] AnimationError),
    #[error(transparent)]
    Data(#[from] DataError),
}

/// 棋盤錯誤
#[derive(Debug, ThisError)]
pub enum BoardError {
    #[error("位置超出棋盤邊界: ({x}, {y}) 邊界 ({size}, {size})")]
    OutOfBounds { x: Coord, y: Coord, size: Coord },
    #[error("位置 ({x}, {y}) 沒有棋子")]
    EmptyCell { x: Coord, y: Coord },
    #[error("位置 ({x1}, {y1}) 與 ({x2}, {y2}) 不相鄰")]
    NotAdjacent {
        x1: Coord,
        y1: Coord,
        x2: Coord,
        y2: Coord,
    },
}

/// 棋盤字串與走法位元欄位的編解碼錯誤
#[derive(Debug, ThisError)]
pub enum CodecError {
    #[error("編碼長度錯誤: 至少需要 {expected} bytes，實際 {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("第 {index} 格的棋子編碼無效: {byte:#04x}")]
    InvalidCellCode { index: usize, byte: u8 },
    #[error("第 {index} 格的鎖定編碼無效: {byte:#04x}")]
    InvalidLockCode { index: usize, byte: u8 },
    #[error("第 {index} byte 的填充字元無效: {byte:#04x}")]
    InvalidPadding { index: usize, byte: u8 },
    #[error("走法欄位 {field} 的值 {value} 超出 {width} bits")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        width: u32,
    },
    #[error("格子索引 {index} 不在棋盤上")]
    CellIndexOutOfRange { index: CellIndex },
}

/// 格式載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("解析失敗: {0}")]
    ParseError(String),
    #[error("{format} 反序列化失敗: {reason}")]
    DeserializeError { format: String, reason: String },
    #[error("設定無效: {0}")]
    InvalidConfig(String),
    #[error("初始佈局左右不對稱: R{row}C{col}({left:?}) != R{row}C{mirror}({right:?})")]
    AsymmetricSetup {
        row: usize,
        col: usize,
        mirror: usize,
        left: char,
        right: char,
    },
}

/// 路徑規劃的不變量違反
#[derive(Debug, ThisError)]
pub enum PathError {
    #[error("從 ({x}, {y}) 無法到達任何目標格 {candidates:?}")]
    Unreachable {
        x: Coord,
        y: Coord,
        candidates: Vec<(Coord, Coord)>,
    },
    #[error("半格座標 ({x2}/2, {y2}/2) 不是格子也不是邊")]
    InvalidTarget { x2: Coord, y2: Coord },
}

/// 動畫編譯與排程錯誤
#[derive(Debug, ThisError)]
pub enum AnimationError {
    #[error("動畫進行中，拒絕新的走法")]
    Busy,
    #[error("起點 ({x}, {y}) 沒有可移動的棋子")]
    NoPieceAtOrigin { x: Coord, y: Coord },
    #[error("移除王冠時目標不可與起點相同: ({x}, {y})")]
    DecrownInPlace { x: Coord, y: Coord },
    #[error("位置 ({x}, {y}) 沒有對應的渲染棋子")]
    MissingRenderPiece { x: Coord, y: Coord },
    #[error("每步 tick 數必須大於 0")]
    ZeroTicks,
}

/// World 資料缺失
#[derive(Debug, ThisError)]
pub enum DataError {
    #[error("World 中找不到 Resource: {resource_name}")]
    ResourceNotFound { resource_name: String },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(e.context(context)),
        }
    }
}
