//! 走法位元欄位編解碼
//!
//! 欄位由最低位開始依序排列，寬度表是與引擎之間的固定協定，順序不可更動：
//!
//! | 欄位 | kind | orig | dest | atkDir | doRet | capPiece | capReg | origLock | destLock |
//! |------|------|------|------|--------|-------|----------|--------|----------|----------|
//! | bits | 3    | 7    | 7    | 2      | 1     | 2        | 1      | 4        | 4        |
//!
//! 共 31 bits，以 u64 承載；交給 `ApplyMove` 時可無損轉為 u32。
//! 編碼時任一欄位超出寬度即回傳錯誤，不做截斷。

use crate::domain::alias::{CellIndex, PackedMove};
use crate::domain::core_types::{Direction, Position};
use crate::error::{CodecError, Result};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// 走法欄位（宣告順序即位元順序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MoveField {
    Kind,
    Orig,
    Dest,
    AtkDir,
    DoRet,
    CapPiece,
    CapReg,
    OrigLock,
    DestLock,
}

impl MoveField {
    pub const fn width(self) -> u32 {
        match self {
            MoveField::Kind => 3,
            MoveField::Orig | MoveField::Dest => 7,
            MoveField::AtkDir => 2,
            MoveField::DoRet => 1,
            MoveField::CapPiece => 2,
            MoveField::CapReg => 1,
            MoveField::OrigLock | MoveField::DestLock => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MoveField::Kind => "kind",
            MoveField::Orig => "orig",
            MoveField::Dest => "dest",
            MoveField::AtkDir => "atkDir",
            MoveField::DoRet => "doRet",
            MoveField::CapPiece => "capPiece",
            MoveField::CapReg => "capReg",
            MoveField::OrigLock => "origLock",
            MoveField::DestLock => "destLock",
        }
    }

    pub const fn max_value(self) -> u64 {
        (1 << self.width()) - 1
    }
}

/// 所有欄位寬度總和
pub const PACKED_MOVE_BITS: u32 = 31;

/// 解碼後的走法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Move {
    /// 走法種類；bit 2 為移除王冠旗標，其餘由引擎定義
    pub kind: u8,
    pub orig: CellIndex,
    pub dest: CellIndex,
    /// 攻擊方向（`Direction` 的編碼）
    pub atk_dir: u8,
    /// 攻擊後停在相鄰格（目標為邊）
    pub do_ret: bool,
    /// 被吃棋子的兵種
    pub cap_piece: u8,
    /// 被吃棋子是否戴冠
    pub cap_reg: bool,
    pub orig_lock: u8,
    pub dest_lock: u8,
}

impl Move {
    fn field(&self, field: MoveField) -> u64 {
        match field {
            MoveField::Kind => u64::from(self.kind),
            MoveField::Orig => u64::from(self.orig),
            MoveField::Dest => u64::from(self.dest),
            MoveField::AtkDir => u64::from(self.atk_dir),
            MoveField::DoRet => u64::from(self.do_ret),
            MoveField::CapPiece => u64::from(self.cap_piece),
            MoveField::CapReg => u64::from(self.cap_reg),
            MoveField::OrigLock => u64::from(self.orig_lock),
            MoveField::DestLock => u64::from(self.dest_lock),
        }
    }

    // value 已經過遮罩，轉型不會遺失位元
    fn set_field(&mut self, field: MoveField, value: u64) {
        match field {
            MoveField::Kind => self.kind = value as u8,
            MoveField::Orig => self.orig = value as CellIndex,
            MoveField::Dest => self.dest = value as CellIndex,
            MoveField::AtkDir => self.atk_dir = value as u8,
            MoveField::DoRet => self.do_ret = value != 0,
            MoveField::CapPiece => self.cap_piece = value as u8,
            MoveField::CapReg => self.cap_reg = value != 0,
            MoveField::OrigLock => self.orig_lock = value as u8,
            MoveField::DestLock => self.dest_lock = value as u8,
        }
    }

    /// 依欄位順序左移後 OR 進累加器
    pub fn encode(&self) -> Result<PackedMove> {
        let mut packed: PackedMove = 0;
        let mut offset = 0;
        for field in MoveField::iter() {
            let value = self.field(field);
            if value > field.max_value() {
                return Err(CodecError::FieldOverflow {
                    field: field.name(),
                    value,
                    width: field.width(),
                }
                .into());
            }
            packed |= value << offset;
            offset += field.width();
        }
        Ok(packed)
    }

    /// 依相同順序右移並遮罩；超出 31 bits 的高位被忽略
    pub fn decode(packed: PackedMove) -> Self {
        let mut mv = Move::default();
        let mut offset = 0;
        for field in MoveField::iter() {
            mv.set_field(field, (packed >> offset) & field.max_value());
            offset += field.width();
        }
        mv
    }

    /// 給 `ApplyMove` 的 u32 形式
    pub fn to_wire(&self) -> Result<u32> {
        // 31 bits 必定放得進 u32
        Ok(self.encode()? as u32)
    }

    pub fn origin(&self) -> Result<Position> {
        Position::from_index(self.orig)
    }

    pub fn destination(&self) -> Result<Position> {
        Position::from_index(self.dest)
    }

    pub fn attack_direction(&self) -> Result<Direction> {
        Direction::from_repr(self.atk_dir).ok_or_else(|| {
            CodecError::FieldOverflow {
                field: MoveField::AtkDir.name(),
                value: u64::from(self.atk_dir),
                width: MoveField::AtkDir.width(),
            }
            .into()
        })
    }
}
