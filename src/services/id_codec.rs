/*
 * Responsibility
 * - 公開 ID ↔ 内部 ID (BIGSERIAL) の変換
 * - sqids の扱いはここに閉じ込め、extractor / handler はこの型だけを使う
 * - 非正規形 (同じ数値に decode される別文字列) は受け付けない
 */
use sqids::{Error as SqidsError, Sqids};
use std::{error::Error, fmt};

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug)]
pub enum IdCodecError {
    InvalidMinLength { value: usize },
    Sqids(SqidsError),
    NegativeId { value: i64 },
    DecodeInvalidFormat,
    DecodeOutOfRange,
}

impl fmt::Display for IdCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdCodecError::InvalidMinLength { value } => {
                write!(f, "SQIDS_MIN_LENGTH must be between 0 and 255, got {}", value)
            }
            IdCodecError::Sqids(e) => write!(f, "sqids error: {}", e),
            IdCodecError::NegativeId { value } => {
                write!(f, "id must be non-negative, got {}", value)
            }
            IdCodecError::DecodeInvalidFormat => write!(f, "invalid public id format"),
            IdCodecError::DecodeOutOfRange => write!(f, "decoded id is out of range"),
        }
    }
}

impl Error for IdCodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IdCodecError::Sqids(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SqidsError> for IdCodecError {
    fn from(e: SqidsError) -> Self {
        IdCodecError::Sqids(e)
    }
}

impl IdCodecError {
    /// True when the caller supplied a bad public id (as opposed to a server-side problem).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange
        )
    }
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        let n = u64::try_from(id).map_err(|_| IdCodecError::NegativeId { value: id })?;
        Ok(self.sqids.encode(&[n])?)
    }

    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let nums = self.sqids.decode(public_id);
        let [n] = nums.as_slice() else {
            return Err(IdCodecError::DecodeInvalidFormat);
        };

        let id = i64::try_from(*n).map_err(|_| IdCodecError::DecodeOutOfRange)?;

        // Only the canonical encoding of a number is accepted
        if self.sqids.encode(&[*n])? != public_id {
            return Err(IdCodecError::DecodeInvalidFormat);
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    fn codec() -> IdCodec {
        IdCodec::new(10, ALPHABET).expect("codec")
    }

    #[test]
    fn encoded_ids_respect_min_length_and_decode_back() {
        let c = codec();
        let public = c.encode(42).expect("encode");
        assert!(public.len() >= 10);
        assert_eq!(c.decode(&public).expect("decode"), 42);
    }

    #[test]
    fn negative_ids_cannot_be_encoded() {
        assert!(matches!(
            codec().encode(-1),
            Err(IdCodecError::NegativeId { value: -1 })
        ));
    }

    #[test]
    fn garbage_is_a_client_error() {
        let err = codec().decode("!!!").unwrap_err();
        assert!(err.is_client_error());

        let err = codec().decode("").unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn oversized_min_length_is_rejected() {
        assert!(matches!(
            IdCodec::new(300, ALPHABET),
            Err(IdCodecError::InvalidMinLength { value: 300 })
        ));
    }
}
