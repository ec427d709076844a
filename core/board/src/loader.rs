//! 設定與棋盤載入器

use crate::domain::constants::{BOARD_SIZE, MAX_SETUP_ROWS};
use crate::domain::core_types::{Color, Piece, PieceKind, Position};
use crate::error::{LoadError, Result};
use crate::loader_schema::ClientConfig;
use crate::logic::board::Board;
use std::collections::HashMap;

/// 反序列化並驗證客戶端設定
///
/// 初始佈局也在這裡解析一次，不對稱的佈局在載入時就失敗。
pub fn load_config(config_toml: &str) -> Result<ClientConfig> {
    let config: ClientConfig =
        toml::from_str(config_toml).map_err(|e| LoadError::DeserializeError {
            format: "client.toml".to_string(),
            reason: e.to_string(),
        })?;

    if config.base_ticks_per_step == 0 {
        return Err(LoadError::InvalidConfig("base_ticks_per_step 必須大於 0".to_string()).into());
    }
    if config.tick_rate_hz == 0 {
        return Err(LoadError::InvalidConfig("tick_rate_hz 必須大於 0".to_string()).into());
    }
    if !(0.0..1.0).contains(&config.attack_lunge) {
        return Err(LoadError::InvalidConfig(format!(
            "attack_lunge 必須在 [0, 1) 之間: {}",
            config.attack_lunge
        ))
        .into());
    }
    parse_setup(&config.setup)?;

    Ok(config)
}

/// 從初始佈局建立棋盤
///
/// 佈局格式：每列一個字串，`.` 為視覺分隔會被忽略，剩下必須正好 9 欄
/// - `i` `c` `a` `k`：步兵、騎兵、砲兵、國王
/// - 空白：空格
///
/// 第 r 列放白方，黑方鏡射到第 8 − r 列。每列必須左右對稱，
/// 任何一列不對稱都會在建立棋盤前失敗。
///
/// 例如：
/// ```text
///  ci.aka.ic
///    .cic.
///    .i i.
/// ```
pub fn parse_setup<S: AsRef<str>>(rows: &[S]) -> Result<Board> {
    if rows.len() > MAX_SETUP_ROWS {
        return Err(LoadError::ParseError(format!(
            "初始佈局最多 {MAX_SETUP_ROWS} 列，實際 {}",
            rows.len()
        ))
        .into());
    }

    let parsed = rows
        .iter()
        .enumerate()
        .map(|(row, line)| -> Result<Vec<char>> {
            let cols: Vec<char> = line.as_ref().chars().filter(|&c| c != '.').collect();
            if cols.len() != BOARD_SIZE {
                return Err(LoadError::ParseError(format!(
                    "第 {row} 列應有 {BOARD_SIZE} 欄，實際 {}",
                    cols.len()
                ))
                .into());
            }
            Ok(cols)
        })
        .collect::<Result<Vec<_>>>()?;

    // 先檢查全部列的對稱性，再建立棋盤
    for (row, cols) in parsed.iter().enumerate() {
        for col in 0..=BOARD_SIZE / 2 {
            let mirror = BOARD_SIZE - 1 - col;
            if cols[col] != cols[mirror] {
                return Err(LoadError::AsymmetricSetup {
                    row,
                    col,
                    mirror,
                    left: cols[col],
                    right: cols[mirror],
                }
                .into());
            }
        }
    }

    let mut board = Board::default();
    for (row, cols) in parsed.iter().enumerate() {
        for (col, &symbol) in cols.iter().enumerate() {
            if symbol == ' ' {
                continue;
            }
            let kind = PieceKind::from_symbol(symbol).ok_or_else(|| {
                LoadError::ParseError(format!("第 {row} 列第 {col} 欄的符號無效: {symbol:?}"))
            })?;
            board.place(Position::new(col, row), Piece::new(kind, Color::White))?;
            board.place(
                Position::new(col, BOARD_SIZE - 1 - row),
                Piece::new(kind, Color::Black),
            )?;
        }
    }
    Ok(board)
}

/// 從 ASCII 格式載入棋盤
///
/// ASCII 格式：每行用空格分隔的符號，描述棋盤左上角（最多 9×9），其餘為空格
/// - `.` = 空格
/// - `wi`、`bk` 等 = 陣營 + 兵種，後綴 `+` 表示戴冠
/// - `棋子:標記`（例如 `wi:S`）= 有棋子且標記
/// - 其他字串（`S`、`E` 等）= 標記位置（空格）
/// - 相同的標記會全部收集成 Vec
///
/// 返回：(棋盤, 標記映射)
///
/// 例如：
/// ```text
/// wi:S .  .
/// .    bi E
/// .    .  .
/// ```
pub fn load_from_ascii(ascii: &str) -> Result<(Board, HashMap<String, Vec<Position>>)> {
    let lines: Vec<&str> = ascii
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LoadError::ParseError("棋盤為空".to_string()).into());
    }
    if lines.len() > BOARD_SIZE {
        return Err(LoadError::ParseError("棋盤高度過大".to_string()).into());
    }

    let mut board = Board::default();
    let mut markers: HashMap<String, Vec<Position>> = HashMap::new();

    for (y, line) in lines.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() > BOARD_SIZE {
            return Err(LoadError::ParseError("棋盤寬度過大".to_string()).into());
        }
        for (x, token) in tokens.into_iter().enumerate() {
            let pos = Position { x, y };
            let (piece_token, marker) = match token.split_once(':') {
                Some((piece, marker)) => (Some(piece), Some(marker)),
                None => match parse_piece(token) {
                    Some(_) => (Some(token), None),
                    None if token == "." => (None, None),
                    None => (None, Some(token)),
                },
            };

            if let Some(piece_token) = piece_token {
                let piece = parse_piece(piece_token).ok_or_else(|| {
                    LoadError::ParseError(format!("({x}, {y}) 的棋子符號無效: {piece_token}"))
                })?;
                board.place(pos, piece)?;
            }
            if let Some(marker) = marker {
                markers.entry(marker.to_string()).or_default().push(pos);
            }
        }
    }

    Ok((board, markers))
}

/// `wi`、`bk+` 等
fn parse_piece(token: &str) -> Option<Piece> {
    let (body, regalia) = match token.strip_suffix('+') {
        Some(body) => (body, true),
        None => (token, false),
    };
    let mut chars = body.chars();
    let color = match chars.next()? {
        'w' => Color::White,
        'b' => Color::Black,
        _ => return None,
    };
    let kind = PieceKind::from_symbol(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(Piece {
        kind,
        color,
        regalia,
    })
}
