pub mod json_api;

pub use json_api::{
    finalize_capture_json, rank_subjects_json, seed_record_json, select_squad_json, summarize_subject_json,
    ApiError, ApiResponse, FinalizeRequest, FinalizeResponse, RankRequest, RankResponse, SeedRequest,
    SquadRequest, SummaryRequest, API_VERSION,
};
