// src/services/log_reader.rs

//! Mission log decoding.
//!
//! The game client writes logs as UTF-16LE, but hand-edited or converted
//! files may be UTF-8. Encodings are tried in order and malformed input is
//! never replaced, so the first encoding that decodes cleanly wins.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8_INIT, UTF_16LE_INIT};

use crate::error::{AppError, Result};
use crate::models::{MissionUpload, PendingMission};
use crate::services::resolver::MissionFileNames;

/// Encodings tried for every log file, in order.
pub static LOG_ENCODINGS: [&Encoding; 2] = [&UTF_16LE_INIT, &UTF_8_INIT];

const BOM: char = '\u{feff}';

/// Drop a leading byte-order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Decode `bytes` with the first encoding that accepts them.
///
/// This is not content sniffing. Almost any even-length input is valid
/// UTF-16LE, so a UTF-8 file only falls through to UTF-8 when UTF-16LE
/// rejects it, typically because of an odd byte count or an unpaired
/// surrogate.
pub fn decode_log(
    bytes: &[u8],
    encodings: &[&'static Encoding],
) -> Option<(String, &'static Encoding)> {
    encodings.iter().find_map(|&encoding| {
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| (strip_bom(&text).to_string(), encoding))
    })
}

/// Read and decode a whole log file.
pub async fn read_log(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file(path, e))?;

    match decode_log(&bytes, &LOG_ENCODINGS) {
        Some((text, encoding)) => {
            if encoding != LOG_ENCODINGS[0] {
                log::warn!(
                    "Cannot decode using {}: {}, used {}",
                    LOG_ENCODINGS[0].name(),
                    path.display(),
                    encoding.name()
                );
            }
            Ok(text)
        }
        None => Err(AppError::Decode {
            path: path.to_path_buf(),
            tried: LOG_ENCODINGS
                .iter()
                .map(|e| e.name())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Read a pending mission into its upload entry.
pub async fn read_mission(
    mission: &PendingMission,
    names: &MissionFileNames,
) -> Result<MissionUpload> {
    let label = mission
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| names.label(name))
        .unwrap_or_else(|| mission.timestamp.to_string());

    let log = read_log(&mission.path).await?;
    log::debug!(
        "Read {} ({} chars)",
        mission.path.display(),
        log.chars().count()
    );

    Ok(MissionUpload { label, log })
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, UTF_16LE};

    fn utf16le(text: &str) -> Vec<u8> {
        text.encode_utf16()
            .flat_map(|unit| unit.to_le_bytes())
            .collect()
    }

    #[test]
    fn test_utf16_bom_is_stripped() {
        let bytes = utf16le("\u{feff}Mission start\r\n");
        let (text, encoding) = decode_log(&bytes, &LOG_ENCODINGS).unwrap();
        assert_eq!(text, "Mission start\r\n");
        assert_eq!(encoding, UTF_16LE);
    }

    #[test]
    fn test_utf16_without_bom() {
        let bytes = utf16le("드워프");
        let (text, _) = decode_log(&bytes, &LOG_ENCODINGS).unwrap();
        assert_eq!(text, "드워프");
    }

    #[test]
    fn test_falls_back_to_utf8() {
        // Odd length cannot be UTF-16.
        let bytes = b"\xEF\xBB\xBFabcd";
        let (text, encoding) = decode_log(bytes, &LOG_ENCODINGS).unwrap();
        assert_eq!(text, "abcd");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_even_length_utf8_is_taken_as_utf16() {
        let (text, encoding) = decode_log(b"abcd", &LOG_ENCODINGS).unwrap();
        assert_eq!(encoding, UTF_16LE);
        assert_eq!(text, "\u{6261}\u{6463}");
    }

    #[test]
    fn test_undecodable_input() {
        assert!(decode_log(&[0xFF], &LOG_ENCODINGS).is_none());
    }

    #[test]
    fn test_strip_bom_only_at_start() {
        assert_eq!(strip_bom("a\u{feff}b"), "a\u{feff}b");
        assert_eq!(strip_bom(""), "");
    }

    #[tokio::test]
    async fn test_read_mission_uses_file_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MissionMonitor_1700_2.txt");
        std::fs::write(&path, utf16le("\u{feff}log")).unwrap();

        let mission = PendingMission { timestamp: 2, path };
        let names = MissionFileNames::new().unwrap();
        let upload = read_mission(&mission, &names).await.unwrap();

        assert_eq!(upload.label, "1700_2");
        assert_eq!(upload.log, "log");
    }

    #[tokio::test]
    async fn test_read_log_reports_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MissionMonitor_1.txt");
        std::fs::write(&path, [0xFFu8]).unwrap();

        let err = read_log(&path).await.unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
        assert!(err.to_string().contains("UTF-16LE, UTF-8"));
    }
}
