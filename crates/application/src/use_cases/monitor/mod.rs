mod refresh_blinks;
mod run_pass;

pub use refresh_blinks::RefreshBlinksUseCase;
pub use run_pass::RunCollectionPassUseCase;
