use serde::{Deserialize, Serialize};

use crate::league::ledger::PlayerRecord;

/// JSON body for `POST /api/players/delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePlayersRequest {
    pub names: Vec<String>,
}

/// Urlencoded body for `POST /players/delete`; names separated by newlines or commas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePlayersForm {
    #[serde(default)]
    pub names: String,
}

impl DeletePlayersForm {
    pub fn names(&self) -> Vec<String> {
        self.names
            .split(|c: char| c == '\n' || c == ',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// JSON body for `PUT /api/ledger`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceLedgerRequest {
    pub players: Vec<PlayerRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_names_split() {
        let form = DeletePlayersForm {
            names: "Ann\r\n Bo , ,Steve Park\n".to_string(),
        };
        assert_eq!(form.names(), vec!["Ann", "Bo", "Steve Park"]);
    }
}
