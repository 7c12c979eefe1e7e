use chrono::{DateTime, Utc};

/// Tokens covered by one unit of `token_rate`
pub const TOKENS_PER_RATE_UNIT: i64 = 100;

/// A named upstream generation target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageModel {
    pub id: i32,
    pub name: String,
    /// Credits charged per started block of 100 tokens
    pub token_rate: i64,
    pub created_at: DateTime<Utc>,
}

impl LanguageModel {
    /// `ceil(tokens_used / 100) * token_rate`, saturating on overflow.
    /// Negative token counts are treated as zero.
    pub fn cost_for(&self, tokens_used: i64) -> i64 {
        let tokens = tokens_used.max(0);
        let blocks = tokens / TOKENS_PER_RATE_UNIT
            + i64::from(tokens % TOKENS_PER_RATE_UNIT != 0);
        blocks.saturating_mul(self.token_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(rate: i64) -> LanguageModel {
        LanguageModel {
            id: 1,
            name: "gpt-4".into(),
            token_rate: rate,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn partial_blocks_round_up() {
        assert_eq!(model(2).cost_for(250), 6);
        assert_eq!(model(2).cost_for(1), 2);
        assert_eq!(model(3).cost_for(300), 9);
    }

    #[test]
    fn zero_tokens_are_free() {
        assert_eq!(model(5).cost_for(0), 0);
        assert_eq!(model(5).cost_for(-40), 0);
    }

    #[test]
    fn huge_counts_saturate() {
        assert_eq!(model(1000).cost_for(i64::MAX), i64::MAX);
    }
}
