use serde::{Deserialize, Serialize};

/// A place name ready to be sent to the geocoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub raw_input: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub resolved_city_name: String,
    pub country: String,
    /// Decimal text as returned by the API, empty when absent.
    pub latitude: String,
    pub longitude: String,
}

/// What the API body turned out to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Found(GeocodeResult),
    Empty,
}

/// Where the follow-up action propagates the picked location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTargets {
    pub global_var_file: String,
    pub target_config: String,
    pub toggle_measure: String,
}

impl Default for ActionTargets {
    fn default() -> Self {
        Self {
            global_var_file: "#@#GlobalVar.nek".to_string(),
            target_config: "#NekStart\\Main".to_string(),
            toggle_measure: "mToggle".to_string(),
        }
    }
}

impl ActionTargets {
    /// Builds the bang chain the host runs when the user clicks the result.
    pub fn follow_up_action(&self, result: &GeocodeResult) -> String {
        let fields = [
            ("Longitude", result.longitude.as_str()),
            ("Latitude", result.latitude.as_str()),
            ("City", result.resolved_city_name.as_str()),
            ("Country", result.country.as_str()),
        ];

        let mut action = String::new();
        for (name, value) in fields {
            action.push_str(&format!(
                "[!WriteKeyValue Variables {} \"{}\" \"{}\"]",
                name, value, self.global_var_file
            ));
        }
        // 兩個空格是顯示層既有格式
        for (name, value) in fields {
            action.push_str(&format!(
                "[!SetVariable {}  \"{}\" \"{}\"]",
                name, value, self.target_config
            ));
        }
        action.push_str(&format!(
            "[!UpdateMeter \"*\" \"{}\"][!Redraw \"{}\"][!UpdateMeasure {}]",
            self.target_config, self.target_config, self.toggle_measure
        ));
        action
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRecord {
    Success { text: String, action: String },
    Error { message: String },
}

impl OutputRecord {
    pub fn success(result: &GeocodeResult, targets: &ActionTargets) -> Self {
        OutputRecord::Success {
            text: format!("{}, {}", result.resolved_city_name, result.country),
            action: targets.follow_up_action(result),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        OutputRecord::Error {
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec!["[Result_1]".to_string(), "Meter=String".to_string()];
        match self {
            OutputRecord::Success { text, action } => {
                lines.push(format!("Text={}", text));
                lines.push("MeterStyle=Result_String".to_string());
                lines.push(format!("LeftMouseUpAction={}", action));
            }
            OutputRecord::Error { message } => {
                lines.push(format!("Text={}", message));
                lines.push("MeterStyle=Result_String".to_string());
                lines.push("MouseOverAction=[]".to_string());
                lines.push("MouseLeaveAction=[]".to_string());
            }
        }

        let mut content = lines.join("\n");
        content.push('\n');
        content
    }
}

/// How a single Execute call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// Empty request; nothing fetched, nothing written.
    Rejected,
    Saved { record: OutputRecord, written: bool },
}

impl ExecuteOutcome {
    pub fn record(&self) -> Option<&OutputRecord> {
        match self {
            ExecuteOutcome::Rejected => None,
            ExecuteOutcome::Saved { record, .. } => Some(record),
        }
    }
}
