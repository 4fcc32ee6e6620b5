//! Route modules for the API server
//!
//! - home: Home page shell
//! - transactions: Table fragment, modal form, mutations
//! - filters: Company and numeral format selection

pub mod filters;
pub mod home;
pub mod transactions;

use std::collections::HashMap;

/// Decode an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    let decode = |s: &str| {
        let s = s.replace('+', " ");
        urlencoding::decode(&s).map(|v| v.into_owned()).unwrap_or(s)
    };

    let mut params = HashMap::new();
    for pair in body.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode(key), decode(value));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form() {
        let params = parse_form("description=Team+coffee%21&amount=500&flag");
        assert_eq!(params["description"], "Team coffee!");
        assert_eq!(params["amount"], "500");
        assert_eq!(params["flag"], "");
        assert!(parse_form("").is_empty());
    }
}
