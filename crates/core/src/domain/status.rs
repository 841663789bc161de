use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TranscribeError;

/// 書き起こしジョブの状態
///
/// 序数 (0–6) はシリアライズ済みデータとの互換のため固定。
/// シリアライズ時は大文字の名前 (`"IN_PROGRESS"` など) を使う。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TranscribeJobStatus {
    #[default]
    None = 0,
    Uploading = 1,
    Uploaded = 2,
    Queued = 3,
    InProgress = 4,
    Succeeded = 5,
    Failed = 6,
}

impl TranscribeJobStatus {
    pub const ALL: [TranscribeJobStatus; 7] = [
        Self::None,
        Self::Uploading,
        Self::Uploaded,
        Self::Queued,
        Self::InProgress,
        Self::Succeeded,
        Self::Failed,
    ];

    /// 終端状態
    pub const TERMINAL: [TranscribeJobStatus; 2] = [Self::Succeeded, Self::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Uploading => "UPLOADING",
            Self::Uploaded => "UPLOADED",
            Self::Queued => "QUEUED",
            Self::InProgress => "IN_PROGRESS",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self, TranscribeError> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or_else(|| TranscribeError::InvalidStatus(ordinal.to_string()))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for TranscribeJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 名前は大文字小文字を区別して照合する
impl FromStr for TranscribeJobStatus {
    type Err = TranscribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TranscribeError::InvalidStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_are_stable() {
        let ordinals: Vec<u8> = TranscribeJobStatus::ALL.iter().map(|s| s.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3, 4, 5, 6]);
        for status in TranscribeJobStatus::ALL {
            assert_eq!(TranscribeJobStatus::from_ordinal(status.ordinal()).unwrap(), status);
        }
        assert!(TranscribeJobStatus::from_ordinal(7).is_err());
    }

    #[test]
    fn test_terminal_states() {
        let terminal: Vec<_> = TranscribeJobStatus::ALL
            .into_iter()
            .filter(TranscribeJobStatus::is_terminal)
            .collect();
        assert_eq!(terminal, TranscribeJobStatus::TERMINAL.to_vec());
    }

    #[test]
    fn test_name_lookup_is_case_exact() {
        assert_eq!(
            "IN_PROGRESS".parse::<TranscribeJobStatus>().unwrap(),
            TranscribeJobStatus::InProgress
        );
        assert!("succeeded".parse::<TranscribeJobStatus>().is_err());
        assert!("Succeeded".parse::<TranscribeJobStatus>().is_err());
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(TranscribeJobStatus::default(), TranscribeJobStatus::None);
    }
}
