use serde::{Deserialize, Serialize};

use crate::league::orchestration::ResultSubmission;
use crate::league::rules::{ChopSize, GameVariant};
use crate::league::scoring::ResultShape;

/// JSON body for `POST /api/results`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRequest {
    pub variant: GameVariant,
    pub result: ResultShape,
    #[serde(default)]
    pub rebuys: String,
}

impl From<ResultRequest> for ResultSubmission {
    fn from(request: ResultRequest) -> Self {
        ResultSubmission {
            variant: request.variant,
            shape: request.result,
            rebuys: request.rebuys,
        }
    }
}

/// Result type picked on the HTML form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormShape {
    #[serde(rename = "plain")]
    Plain,
    #[serde(rename = "2chop")]
    TwoChop,
    #[serde(rename = "3chop")]
    ThreeChop,
    #[serde(rename = "4chop")]
    FourChop,
}

/// Urlencoded body for `POST /results`
///
/// The form carries every slot; `shape` decides which ones are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultForm {
    pub variant: GameVariant,
    pub shape: FormShape,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub chop1: String,
    #[serde(default)]
    pub chop2: String,
    #[serde(default)]
    pub chop3: String,
    #[serde(default)]
    pub chop4: String,
    #[serde(default)]
    pub second: String,
    #[serde(default)]
    pub third: String,
    #[serde(default)]
    pub rebuys: String,
}

impl From<ResultForm> for ResultSubmission {
    fn from(form: ResultForm) -> Self {
        let size = match form.shape {
            FormShape::Plain => None,
            FormShape::TwoChop => Some(ChopSize::Two),
            FormShape::ThreeChop => Some(ChopSize::Three),
            FormShape::FourChop => Some(ChopSize::Four),
        };
        let shape = match size {
            None => ResultShape::Plain {
                first: form.first,
                second: form.second,
                third: form.third,
            },
            Some(size) => ResultShape::Chop {
                size,
                choppers: vec![form.chop1, form.chop2, form.chop3, form.chop4],
                second: form.second,
                third: form.third,
            },
        };
        ResultSubmission {
            variant: form.variant,
            shape,
            rebuys: form.rebuys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chop_form_uses_only_chop_slots() {
        let form = ResultForm {
            variant: GameVariant::FiveFree,
            shape: FormShape::TwoChop,
            first: "Ignored".to_string(),
            chop1: "Cy".to_string(),
            chop2: "Di".to_string(),
            chop3: "AlsoIgnored".to_string(),
            chop4: String::new(),
            second: "Ed".to_string(),
            third: String::new(),
            rebuys: String::new(),
        };
        let deltas = ResultSubmission::from(form).deltas();
        assert_eq!(deltas.len(), 3);
        assert_eq!(deltas.get("Cy"), Some(10.0));
        assert_eq!(deltas.get("Di"), Some(10.0));
        assert_eq!(deltas.get("Ed"), Some(7.0));
    }

    #[test]
    fn test_request_from_json() {
        let request: ResultRequest = serde_json::from_str(
            r#"{"variant":"3 FREE","result":{"type":"plain","first":"Ann","second":"Bo"},"rebuys":"Ann 2"}"#,
        )
        .unwrap();
        let deltas = ResultSubmission::from(request).deltas();
        assert_eq!(deltas.get("Ann"), Some(8.0));
        assert_eq!(deltas.get("Bo"), Some(5.0));
    }
}
