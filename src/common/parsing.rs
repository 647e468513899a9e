// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;

pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

pub fn parse_hex_bytes(s: &str) -> Option<Vec<u8>> {
    hex::decode(strip_0x(s.trim())).ok()
}

/// Hex payload given inline or as a path to a file holding it.
pub fn read_hex_arg(arg: &str) -> Result<Vec<u8>, AppError> {
    let text = if std::path::Path::new(arg).is_file() {
        std::fs::read_to_string(arg)?
    } else {
        arg.to_string()
    };
    parse_hex_bytes(&text).ok_or_else(|| AppError::Decode("payload is not valid hex".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parser_accepts_lower_and_upper_prefixes() {
        assert_eq!(parse_hex_bytes("0Xabcd"), Some(vec![0xab, 0xcd]));
        assert_eq!(parse_hex_bytes("0xABCD\n"), Some(vec![0xab, 0xcd]));
        assert_eq!(parse_hex_bytes("abcd"), Some(vec![0xab, 0xcd]));
        assert_eq!(parse_hex_bytes("0xabc"), None);
    }

    #[test]
    fn hex_arg_reads_inline_or_from_file() {
        assert_eq!(read_hex_arg("0x0102").expect("inline"), vec![1, 2]);
        assert!(matches!(read_hex_arg("0xzz"), Err(AppError::Decode(_))));

        let tmp = std::env::temp_dir().join(format!("route-compiler-hex-{}.txt", std::process::id()));
        std::fs::write(&tmp, "0xcafe\n").expect("write hex file");
        let bytes = read_hex_arg(tmp.to_str().expect("utf8 path")).expect("from file");
        std::fs::remove_file(&tmp).ok();
        assert_eq!(bytes, vec![0xca, 0xfe]);
    }
}
