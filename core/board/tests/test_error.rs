use board::error::{Context, Error, ErrorKind, LoadError, Result};

// clear; cargo fmt; cargo test -- --nocapture
#[test]
fn show_error_messages() {
    let load_err = LoadError::ParseError("Invalid symbol".to_string());
    let err: Error = load_err.into();
    let err = err
        .context("解析第 2 列")
        .context("建立初始佈局")
        .context("載入 client.toml");

    let error_str = err.to_string();

    // 驗證原始錯誤訊息
    assert!(error_str.contains("Invalid symbol"));

    // 驗證 contexts 依序附加並帶有呼叫位置
    let lines: Vec<&str> = error_str.lines().collect();
    assert_eq!(lines.len(), 4, "應有 1 行錯誤 + 3 行 context");
    for (line, expected) in lines[1..]
        .iter()
        .zip(["解析第 2 列", "建立初始佈局", "載入 client.toml"])
    {
        assert!(line.contains(expected), "{line} 應包含 {expected}");
        assert!(line.contains("test_error.rs"), "{line} 應包含呼叫位置");
    }
}

#[test]
fn test_context_on_result_keeps_kind() {
    let result: Result<()> = Err(LoadError::InvalidConfig("tick_rate_hz".to_string()).into());
    let err = result.context("驗證設定").expect_err("應保持錯誤");

    assert!(
        matches!(err.kind(), ErrorKind::Load(LoadError::InvalidConfig(_))),
        "context 不應改變錯誤種類"
    );
    assert!(err.to_string().contains("驗證設定"));

    let ok: Result<i32> = Ok(7);
    assert_eq!(ok.context("不會附加").expect("Ok 應原樣返回"), 7);
}
