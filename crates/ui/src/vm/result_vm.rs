use quiz_core::QuizResult;
use services::QuizReport;

/// Display labels for the results page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub increase_label: String,
    pub current_size_label: String,
    pub potential_size_label: String,
    pub success_rate_label: String,
    pub time_required_label: String,
    pub program_duration_label: String,
}

impl From<&QuizResult> for ResultVm {
    fn from(result: &QuizResult) -> Self {
        Self {
            increase_label: format!("{}cm", result.potential_increase),
            current_size_label: format!("{}cm", result.current_size),
            potential_size_label: format!("{}cm", result.potential_size),
            success_rate_label: format!("{}%", result.success_rate),
            time_required_label: format!("{} minutos por dia", result.time_required),
            program_duration_label: format!("{} dias", result.program_duration),
        }
    }
}

impl From<&QuizReport> for ResultVm {
    fn from(report: &QuizReport) -> Self {
        Self::from(&report.result)
    }
}
