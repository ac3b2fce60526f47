use dioxus::prelude::{use_signal, Signal};

use crate::config::PAGE_SIZE;
use crate::domain::entities::raw::RawRow;
use crate::domain::entities::view::TableQuery;

/// Transient UI controls. The dataset itself lives in the store; `revision`
/// is bumped after every store mutation so derived views recompute.
#[derive(Clone, Copy, PartialEq)]
pub struct AppState {
    pub revision: Signal<u64>,
    pub table_query: Signal<TableQuery>,
    pub start_date: Signal<String>,
    pub end_date: Signal<String>,
    pub preview: Signal<Vec<RawRow>>,
    pub message: Signal<String>,
    pub busy: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            revision: use_signal(|| 0_u64),
            table_query: use_signal(|| TableQuery::new(PAGE_SIZE)),
            start_date: use_signal(String::new),
            end_date: use_signal(String::new),
            preview: use_signal(Vec::<RawRow>::new),
            message: use_signal(String::new),
            busy: use_signal(|| false),
        }
    }
}
