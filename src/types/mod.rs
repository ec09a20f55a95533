pub mod job;

pub use job::{
    normalize_qualifications, Job, JobDraft, JobId, JobType, NewJob, QualificationsInput,
    SalaryInput,
};
