// Résumé analysis: request validation, prompt composition, and the pipeline that
// ties extraction and the text-generation backend together.
// All backend calls go through llm_client; nothing here talks HTTP to Gemini.

pub mod composer;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, ExtractionError};
use crate::llm_client::BackendError;

pub use composer::compose;
pub use orchestrator::Analyzer;

/// Labels used by the original upload form; accepted as aliases of the wire ids.
const JOB_FIT_LABEL: &str = "Analizar con descripción de puesto";
const GENERAL_ATS_LABEL: &str = "Análisis general ATS";

const JOB_FIT_CHECKS: &[&str] = &[
    "Tasa de parseo ATS",
    "Cuantificación del impacto",
    "Formato y tamaño del archivo",
    "Repetición de palabras",
    "Ortografía y gramática",
    "Longitud del CV",
    "Longitud de bullets",
    "Diseño",
    "Email profesional",
    "Uso de voz pasiva",
    "Buzzwords",
    "Información de contacto",
    "Secciones esenciales",
    "Personalidad",
    "Secciones adicionales",
    "Habilidades duras",
    "Habilidades blandas",
    "Puntuación y evaluación final",
];

const GENERAL_ATS_CHECKS: &[&str] = &[
    "Porcentaje de compatibilidad ATS",
    "Tasa de parseo ATS",
    "Cuantificación del impacto",
    "Formato y estilo",
    "Secciones y habilidades",
    "Recomendaciones de mejora",
    "Currículum optimizado para ATS",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Fit against a supplied job description.
    JobFit,
    /// ATS compatibility review with no job description.
    GeneralAts,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 2] = [AnalysisMode::JobFit, AnalysisMode::GeneralAts];

    pub fn id(self) -> &'static str {
        match self {
            AnalysisMode::JobFit => "job_fit",
            AnalysisMode::GeneralAts => "general_ats",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::JobFit => JOB_FIT_LABEL,
            AnalysisMode::GeneralAts => GENERAL_ATS_LABEL,
        }
    }

    pub fn requires_job_description(self) -> bool {
        matches!(self, AnalysisMode::JobFit)
    }

    pub fn checks(self) -> &'static [&'static str] {
        match self {
            AnalysisMode::JobFit => JOB_FIT_CHECKS,
            AnalysisMode::GeneralAts => GENERAL_ATS_CHECKS,
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::MissingMode);
        }
        AnalysisMode::ALL
            .into_iter()
            .find(|mode| s.eq_ignore_ascii_case(mode.id()) || s == mode.label())
            .ok_or_else(|| ValidationError::UnknownMode(s.to_string()))
    }
}

/// Input problems detected before any I/O. Each message names what to fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a PDF résumé.")]
    MissingFile,

    #[error("Please provide a valid Gemini API key.")]
    MissingApiKey,

    #[error("Please select an analysis mode (job_fit or general_ats).")]
    MissingMode,

    #[error("Unknown analysis mode '{0}'; expected job_fit or general_ats.")]
    UnknownMode(String),

    #[error("Please provide a job description for the job-fit analysis.")]
    MissingJobDescription,
}

impl ValidationError {
    /// The request field the caller has to fix.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingFile => "file",
            ValidationError::MissingApiKey => "api_key",
            ValidationError::MissingMode | ValidationError::UnknownMode(_) => "mode",
            ValidationError::MissingJobDescription => "job_description",
        }
    }
}

/// Terminal failure of an analysis: bad input, bad file, or backend trouble.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// One unit of work as submitted by a caller. Fields are optional and the mode is
/// still raw text here; the orchestrator validates them in a fixed order.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub mode: Option<String>,
    pub document: Option<Document>,
    pub job_description: Option<String>,
    pub api_key: Option<String>,
}

/// A finished analysis: the validated mode and the backend's text, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub mode: AnalysisMode,
    pub report: String,
}

/// Public description of a mode, served by the catalogue endpoint.
#[derive(Debug, Serialize)]
pub struct ModeInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub requires_job_description: bool,
    pub checks: &'static [&'static str],
}

impl From<AnalysisMode> for ModeInfo {
    fn from(mode: AnalysisMode) -> Self {
        ModeInfo {
            id: mode.id(),
            label: mode.label(),
            requires_job_description: mode.requires_job_description(),
            checks: mode.checks(),
        }
    }
}
