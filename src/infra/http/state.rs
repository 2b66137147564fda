use std::sync::Arc;

use crate::application::case_studies::CaseStudyService;
use crate::application::identity::IdentityProvider;
use crate::application::insights::InsightService;
use crate::application::notify::Notifier;
use crate::application::projects::ProjectService;
use crate::application::proposals::ProposalService;

#[derive(Clone)]
pub struct ApiState {
    pub projects: Arc<ProjectService>,
    pub case_studies: Arc<CaseStudyService>,
    pub insights: Arc<InsightService>,
    pub proposals: Arc<ProposalService>,
    pub notifier: Arc<Notifier>,
    pub identity: Arc<dyn IdentityProvider>,
}
