use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::models::JobStatus;

/// <job_name, JobStatus>
pub type JobStatusMap = HashMap<&'static str, JobStatus>;

pub type SharedStatuses = Arc<RwLock<JobStatusMap>>;
