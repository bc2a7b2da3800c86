use shared::{
    domain::ResumeId,
    protocol::{Resume, ResumeAnalysis, ResumeFeedback},
};

use super::{ScreenError, FETCH_RESUME_ANALYSIS_FAILED};
use crate::http::ApiClient;

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeAnalysisView {
    pub resume: Resume,
    pub analysis: ResumeAnalysis,
    pub feedback: Vec<ResumeFeedback>,
}

/// Resume analysis screen: resume, analysis and feedback are fetched together
/// and the screen fails if any of them does.
pub async fn load_resume_analysis(
    api: &ApiClient,
    id: ResumeId,
) -> Result<ResumeAnalysisView, ScreenError> {
    let resumes = api.resumes();
    let (resume, analysis, feedback) = tokio::try_join!(
        resumes.retrieve(id),
        resumes.analysis(id),
        resumes.feedback(id)
    )
    .map_err(|err| ScreenError::from_client(&err, FETCH_RESUME_ANALYSIS_FAILED))?;

    Ok(ResumeAnalysisView {
        resume,
        analysis,
        feedback,
    })
}
