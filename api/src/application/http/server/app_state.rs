use std::sync::Arc;

use fam_core::application::FamService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: FamService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: FamService) -> Self {
        Self { args, service }
    }
}
