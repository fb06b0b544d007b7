use std::collections::HashMap;
use std::sync::Arc;
use crate::domain::{
    models::{
        report::{GenerateReportInput, GeneratedContent, Report, PROMPT_VERSION},
        shop::{ReportMode, ReportTone},
    },
    ports::{LlmService, ReferenceRepository, ReportRepository},
};
use crate::error::AppError;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

const UNKNOWN_CODE_MEANING: &str = "Unknown code (provide a generic explanation).";

const SYSTEM_PROMPT: &str = "You are an experienced automotive technician and service advisor.
You explain issues clearly, avoid overconfidence, and respect that final diagnosis belongs to human technicians.
Return only JSON matching the requested schema.";

const OUTPUT_INSTRUCTION: &str = "Given the following structured JSON, generate a tech view, customer view, and maintenance suggestions. \
Return ONLY JSON with keys: techView (string), customerView (string), maintenanceSuggestions (string[]).";

const FALLBACK_TECH_VIEW: &str =
    "We were unable to generate a detailed structured explanation. Please re-run the report or adjust inputs.";
const FALLBACK_CUSTOMER_VIEW: &str =
    "We had trouble generating a detailed explanation this time. Please ask your service advisor to try again.";

#[derive(Clone)]
pub struct ModelSelection {
    pub standard: String,
    pub premium: String,
}

impl ModelSelection {
    pub fn for_mode(&self, mode: ReportMode) -> &str {
        match mode {
            ReportMode::Standard => &self.standard,
            ReportMode::Premium => &self.premium,
        }
    }
}

pub struct GeneratedReport {
    pub id: String,
    pub content: GeneratedContent,
}

pub struct ReportService {
    reference_repo: Arc<dyn ReferenceRepository>,
    report_repo: Arc<dyn ReportRepository>,
    llm: Arc<dyn LlmService>,
    models: ModelSelection,
}

impl ReportService {
    pub fn new(
        reference_repo: Arc<dyn ReferenceRepository>,
        report_repo: Arc<dyn ReportRepository>,
        llm: Arc<dyn LlmService>,
        models: ModelSelection,
    ) -> Self {
        Self { reference_repo, report_repo, llm, models }
    }

    #[instrument(skip(self, input, tone), fields(shop_id = %input.shop_id, mode = %input.mode))]
    pub async fn generate(&self, input: GenerateReportInput, tone: ReportTone) -> Result<GeneratedReport, AppError> {
        let codes = normalize_codes(&input.codes);
        if codes.is_empty() {
            return Err(AppError::Validation("At least one code is required".into()));
        }

        let known: HashMap<String, String> = self.reference_repo.find_codes(&codes).await?
            .into_iter()
            .map(|row| (row.code, row.generic_meaning))
            .collect();

        let codes_with_meaning: Vec<Value> = codes.iter()
            .map(|code| json!({
                "code": code,
                "meaning": known.get(code).map(String::as_str).unwrap_or(UNKNOWN_CODE_MEANING),
            }))
            .collect();

        let band = match input.vehicle.mileage {
            Some(mileage) => self.reference_repo.find_band(mileage).await?,
            None => None,
        };

        let context = json!({
            "prompt_version": PROMPT_VERSION,
            "mode": input.mode,
            "tone": tone,
            "vehicle": input.vehicle,
            "codes": codes_with_meaning,
            "complaint": input.complaint,
            "notes": input.notes.clone().unwrap_or_default(),
            "mileage_band": band,
        });

        let user_prompt = format!("{}\n\n{}", OUTPUT_INSTRUCTION, context);
        let model = self.models.for_mode(input.mode);

        info!("Requesting report generation from model {}", model);
        let raw = self.llm.generate_json(model, SYSTEM_PROMPT, &user_prompt).await?;

        let (content, degraded) = parse_model_output(&raw);
        if degraded {
            warn!("Model returned unparseable output, storing fallback content");
        }

        let report = Report::new(&input, &codes, &content, degraded);
        let saved = self.report_repo.create(&report).await?;
        info!("Report stored: {}", saved.id);

        Ok(GeneratedReport { id: saved.id, content })
    }
}

/// Trims and uppercases each code, dropping blanks.
pub fn normalize_codes(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Parses the model response. The flag is true when the fallback payload was used.
pub fn parse_model_output(raw: &str) -> (GeneratedContent, bool) {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => (coerce_output(&value), false),
        Err(_) => (fallback_content(), true),
    }
}

fn coerce_output(value: &Value) -> GeneratedContent {
    let text = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default().to_string();

    let maintenance_suggestions = value.get("maintenanceSuggestions")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    GeneratedContent {
        tech_view: text("techView"),
        customer_view: text("customerView"),
        maintenance_suggestions,
    }
}

fn fallback_content() -> GeneratedContent {
    GeneratedContent {
        tech_view: FALLBACK_TECH_VIEW.to_string(),
        customer_view: FALLBACK_CUSTOMER_VIEW.to_string(),
        maintenance_suggestions: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_codes_is_case_and_whitespace_invariant() {
        let raw = vec!["p0301".to_string(), " P0171 ".to_string(), "   ".to_string()];
        assert_eq!(normalize_codes(&raw), vec!["P0301", "P0171"]);
    }

    #[test]
    fn test_invalid_json_uses_fallback() {
        let (content, degraded) = parse_model_output("Sorry, I can't do that");
        assert!(degraded);
        assert!(!content.tech_view.is_empty());
        assert!(!content.customer_view.is_empty());
        assert!(content.maintenance_suggestions.is_empty());
    }

    #[test]
    fn test_missing_fields_are_coerced() {
        let (content, degraded) = parse_model_output(r#"{"techView": "Misfire on cyl 1", "maintenanceSuggestions": "oil change"}"#);
        assert!(!degraded);
        assert_eq!(content.tech_view, "Misfire on cyl 1");
        assert_eq!(content.customer_view, "");
        assert!(content.maintenance_suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_keep_only_strings() {
        let (content, _) = parse_model_output(r#"{"techView":"t","customerView":"c","maintenanceSuggestions":["Replace plugs", 3, "Check coils"]}"#);
        assert_eq!(content.maintenance_suggestions, vec!["Replace plugs", "Check coils"]);
    }

    #[test]
    fn test_model_selection_by_mode() {
        let models = ModelSelection { standard: "small".into(), premium: "large".into() };
        assert_eq!(models.for_mode(ReportMode::Standard), "small");
        assert_eq!(models.for_mode(ReportMode::Premium), "large");
    }
}
