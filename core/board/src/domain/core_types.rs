//! 基本資料類型定義

use crate::domain::alias::{CellIndex, Coord};
use crate::domain::constants::{BOARD_SIZE, CELL_COUNT};
use crate::error::{BoardError, CodecError, PathError, Result};
use std::fmt;
use strum_macros::{EnumIter, FromRepr};

// ============================================================================
// 棋子
// ============================================================================

/// 兵種（數值即編碼中的 kindIndex）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
pub enum PieceKind {
    Infantry = 0,
    Cavalry = 1,
    Artillery = 2,
    King = 3,
}

impl PieceKind {
    /// 佈局與渲染標籤使用的字元
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Infantry => 'i',
            PieceKind::Cavalry => 'c',
            PieceKind::Artillery => 'a',
            PieceKind::King => 'k',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'i' => Some(PieceKind::Infantry),
            'c' => Some(PieceKind::Cavalry),
            'a' => Some(PieceKind::Artillery),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// 陣營
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn symbol(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

/// 棋盤上的一枚棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// 是否戴冠（升變）
    pub regalia: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            regalia: false,
        }
    }

    pub fn tag(&self) -> PieceTag {
        PieceTag {
            color: self.color,
            kind: self.kind,
        }
    }
}

/// 棋子標籤（陣營 + 兵種），顯示為 `wi`、`bk` 等
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceTag {
    pub color: Color,
    pub kind: PieceKind,
}

impl fmt::Display for PieceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.symbol(), self.kind.symbol())
    }
}

// ============================================================================
// 格子
// ============================================================================

/// 2-bit 方向鎖定遮罩
///
/// - bit 0：水平鎖定（與右側格子之間）
/// - bit 1：垂直鎖定（與下方格子之間）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LockMask(u8);

impl LockMask {
    pub const HORIZONTAL: LockMask = LockMask(0b01);
    pub const VERTICAL: LockMask = LockMask(0b10);

    /// 超過 2 bits 時回傳 None
    pub fn from_bits(bits: u8) -> Option<Self> {
        (bits <= 0b11).then_some(LockMask(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: LockMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: LockMask) {
        self.0 |= other.0;
    }
}

/// 單一格子：至多一枚棋子 + 鎖定遮罩
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub piece: Option<Piece>,
    pub locks: LockMask,
}

// ============================================================================
// 位置與方向
// ============================================================================

/// 棋盤位置（x = 欄，y = 列）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// 由格子索引轉換，超出 81 格回傳錯誤
    pub fn from_index(index: CellIndex) -> Result<Self> {
        let raw = usize::from(index);
        if raw >= CELL_COUNT {
            return Err(CodecError::CellIndexOutOfRange { index }.into());
        }
        Ok(Self {
            x: raw % BOARD_SIZE,
            y: raw / BOARD_SIZE,
        })
    }

    /// 格子索引（`row * 9 + col`），位置必須在棋盤內
    pub fn index(self) -> Result<CellIndex> {
        self.ensure_on_board()?;
        Ok((self.y * BOARD_SIZE + self.x) as CellIndex)
    }

    /// 往指定方向移動一格，超出棋盤回傳 `None`
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let next = Position { x, y };
        next.is_on_board().then_some(next)
    }

    pub fn ensure_on_board(self) -> Result<()> {
        if self.is_on_board() {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                x: self.x,
                y: self.y,
                size: BOARD_SIZE,
            }
            .into())
        }
    }
}

/// 四方向，順序即 `atkDir` 的編碼：+x、+y、−x、−y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Direction {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Direction {
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Right | Direction::Left => Axis::Horizontal,
            Direction::Down | Direction::Up => Axis::Vertical,
        }
    }
}

/// 座標軸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// 沿 x 軸
    Horizontal,
    /// 沿 y 軸
    Vertical,
}

impl Axis {
    /// 該軸向對應的鎖定位元
    pub fn lock(self) -> LockMask {
        match self {
            Axis::Horizontal => LockMask::HORIZONTAL,
            Axis::Vertical => LockMask::VERTICAL,
        }
    }
}

// ============================================================================
// 走法目標
// ============================================================================

/// 兩個相鄰格子之間的邊（半格座標）
///
/// `first` 永遠是座標較小的一格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    first: Position,
    second: Position,
}

impl Edge {
    pub fn new(a: Position, b: Position) -> Result<Self> {
        a.ensure_on_board()?;
        b.ensure_on_board()?;
        if a.x.abs_diff(b.x) + a.y.abs_diff(b.y) != 1 {
            return Err(BoardError::NotAdjacent {
                x1: a.x,
                y1: a.y,
                x2: b.x,
                y2: b.y,
            }
            .into());
        }
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Ok(Self { first, second })
    }

    pub fn cells(self) -> [Position; 2] {
        [self.first, self.second]
    }

    pub fn axis(self) -> Axis {
        if self.first.y == self.second.y {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// 邊中點（渲染座標）
    pub fn midpoint(self) -> RenderPosition {
        let a = RenderPosition::from(self.first);
        let b = RenderPosition::from(self.second);
        RenderPosition {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
        }
    }
}

/// 走法目標：單一格子，或需要解歧的邊
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveTarget {
    Cell(Position),
    /// 兩側格子之一是終點（空格），另一個是被攻擊的格子
    Edge(Edge),
}

impl MoveTarget {
    /// 由兩倍座標建立：偶數為格子，單一軸為奇數表示半格
    ///
    /// 例如 x = 3.5, y = 0 寫成 `(7, 0)`。
    pub fn from_half_units(x2: Coord, y2: Coord) -> Result<Self> {
        match (x2 % 2, y2 % 2) {
            (0, 0) => {
                let pos = Position::new(x2 / 2, y2 / 2);
                pos.ensure_on_board()?;
                Ok(MoveTarget::Cell(pos))
            }
            (1, 0) => Edge::new(
                Position::new(x2 / 2, y2 / 2),
                Position::new(x2 / 2 + 1, y2 / 2),
            )
            .map(MoveTarget::Edge),
            (0, 1) => Edge::new(
                Position::new(x2 / 2, y2 / 2),
                Position::new(x2 / 2, y2 / 2 + 1),
            )
            .map(MoveTarget::Edge),
            _ => Err(PathError::InvalidTarget { x2, y2 }.into()),
        }
    }

    /// 所有候選終點
    pub fn candidates(&self) -> Vec<Position> {
        match self {
            MoveTarget::Cell(pos) => vec![*pos],
            MoveTarget::Edge(edge) => edge.cells().to_vec(),
        }
    }
}

// ============================================================================
// 渲染座標
// ============================================================================

/// 可為小數的渲染座標（動畫進行中使用）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderPosition {
    pub x: f32,
    pub y: f32,
}

impl From<Position> for RenderPosition {
    fn from(pos: Position) -> Self {
        Self {
            x: pos.x as f32,
            y: pos.y as f32,
        }
    }
}

impl RenderPosition {
    /// 是否正好落在該格子上
    pub fn is_at(self, pos: Position) -> bool {
        self == RenderPosition::from(pos)
    }
}
