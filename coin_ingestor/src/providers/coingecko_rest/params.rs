use crate::{
    models::request_params::{MAX_TOP_N, MarketsRequestParams},
    providers::{ProviderError, ValidationSnafu},
};

/// Checks the universal request against the `/coins/markets` endpoint rules.
pub fn validate_params(params: &MarketsRequestParams) -> Result<(), ProviderError> {
    if !(1..=MAX_TOP_N).contains(&params.top_n) {
        return ValidationSnafu {
            message: format!("top_n must be between 1 and {MAX_TOP_N}, got {}", params.top_n),
        }
        .fail();
    }

    let currency = params.vs_currency.trim();
    if currency.is_empty() || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return ValidationSnafu {
            message: format!("vs_currency must be a currency code, got {:?}", params.vs_currency),
        }
        .fail();
    }

    Ok(())
}

/// Builds the query string pairs for one page of the markets listing.
pub fn construct_params(params: &MarketsRequestParams) -> Vec<(String, String)> {
    vec![
        (
            "vs_currency".to_string(),
            params.vs_currency.trim().to_lowercase(),
        ),
        ("order".to_string(), "market_cap_desc".to_string()),
        ("per_page".to_string(), params.top_n.to_string()),
        ("page".to_string(), "1".to_string()),
        ("sparkline".to_string(), "false".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(vs: &str, top_n: u32) -> MarketsRequestParams {
        MarketsRequestParams {
            vs_currency: vs.to_string(),
            top_n,
        }
    }

    #[test]
    fn test_valid_params() {
        assert!(validate_params(&params("usd", 20)).is_ok());
        assert!(validate_params(&params("EUR", 1)).is_ok());
        assert!(validate_params(&params("usd", MAX_TOP_N)).is_ok());
    }

    #[test]
    fn test_top_n_bounds() {
        assert!(validate_params(&params("usd", 0)).is_err());
        let err = validate_params(&params("usd", MAX_TOP_N + 1)).unwrap_err();
        assert!(matches!(err, ProviderError::Validation { .. }));
        assert!(err.to_string().contains("top_n"));
    }

    #[test]
    fn test_bad_currency() {
        assert!(validate_params(&params("", 20)).is_err());
        assert!(validate_params(&params("us d", 20)).is_err());
        assert!(validate_params(&params("usd&x=1", 20)).is_err());
    }

    #[test]
    fn test_query_pairs() {
        let q = construct_params(&params(" USD ", 5));
        assert!(q.contains(&("vs_currency".to_string(), "usd".to_string())));
        assert!(q.contains(&("per_page".to_string(), "5".to_string())));
        assert!(q.contains(&("order".to_string(), "market_cap_desc".to_string())));
    }
}
