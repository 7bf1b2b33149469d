//! Scheduler console.
//!
//! # Data Flow
//! ```text
//! Console::new(scheduler)
//!     → route_table() (ordered keys → handlers capturing the scheduler)
//!     → handlers.rs (parse query, query scheduler)
//!     → views.rs (build document)
//!     → Response
//! ```
//!
//! # Routes (in match order)
//! - `pausejobgroup`  → pause group, redirect
//! - `resumejobgroup` → resume group, redirect
//! - `jobgroup`       → job group page
//! - `style`          → stylesheet (`/style.css`)
//! - `index`          → group overview
//!
//! The action keys end with `jobgroup`, so they must precede it.

pub mod handlers;
pub mod views;

use std::sync::Arc;
use url::Url;

use crate::routing::RouteTable;
use crate::scheduler::Scheduler;

/// Console context: the scheduler the handlers act on.
#[derive(Clone)]
pub struct Console {
    scheduler: Arc<dyn Scheduler>,
}

impl Console {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.scheduler
    }

    /// Build the console's route table.
    pub fn route_table(&self) -> RouteTable {
        let pause = self.scheduler.clone();
        let resume = self.scheduler.clone();
        let group = self.scheduler.clone();
        let index = self.scheduler.clone();

        RouteTable::builder()
            .route("pausejobgroup", move |uri: &Url| {
                handlers::pause_job_group(pause.as_ref(), uri)
            })
            .route("resumejobgroup", move |uri: &Url| {
                handlers::resume_job_group(resume.as_ref(), uri)
            })
            .route("jobgroup", move |uri: &Url| handlers::job_group(group.as_ref(), uri))
            .route("style", handlers::stylesheet)
            .route("index", move |uri: &Url| handlers::index(index.as_ref(), uri))
            .build()
    }
}
