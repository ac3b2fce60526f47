use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::{error, warn};

use crate::config::{default_export_dir, DashboardConfig, WINDOW_TITLE};
use crate::domain::entities::campaign::{CampaignRecord, CampaignStatus};
use crate::domain::entities::raw::RawRow;
use crate::domain::entities::view::{
    DashboardViews, NamedValue, SortKey, SortSpec, TablePage, TableQuery,
};
use crate::domain::sample::sample_dataset;
use crate::infra::memory::store::MemoryStore;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::format::{date_filter, format_count, format_currency};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::store::DatasetStore;
use crate::usecase::services::aggregate_service::AggregateService;
use crate::usecase::services::export_service::{
    default_file_name, ExportFormat, ExportService, ExportView,
};
use crate::usecase::services::import_service::{ImportService, UploadKind};
use crate::usecase::services::query_service::QueryService;

const CARD_STYLE: &str = "background: #fff; border: 1px solid #ddd; border-radius: 4px; padding: 16px;";
const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 4px 8px; text-align: left;";

#[derive(Clone)]
struct Services {
    import: Arc<ImportService>,
    aggregate: Arc<AggregateService>,
    query: Arc<QueryService>,
    export: Arc<ExportService>,
}

impl Services {
    fn new(config: DashboardConfig) -> Self {
        let store: Arc<dyn DatasetStore> = Arc::new(MemoryStore::new(sample_dataset()));
        Self {
            import: Arc::new(ImportService::new(store.clone(), config.clone())),
            aggregate: Arc::new(AggregateService::new(store.clone(), config.funnel_ratios)),
            query: Arc::new(QueryService::new(store.clone())),
            export: Arc::new(ExportService::new(store, config.funnel_ratios)),
        }
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.import, &other.import)
            && Arc::ptr_eq(&self.aggregate, &other.aggregate)
            && Arc::ptr_eq(&self.query, &other.query)
            && Arc::ptr_eq(&self.export, &other.export)
    }
}

fn handle_upload(services: &Services, mut state: AppState, kind: UploadKind) {
    if *state.busy.read() {
        return;
    }
    let (filter_name, extensions): (&str, &[&str]) = match kind {
        UploadKind::Csv => ("CSV", &["csv"]),
        UploadKind::Spreadsheet => ("Excel", &["xlsx", "xls"]),
    };
    let Some(paths) = FileDialog::new()
        .add_filter(filter_name, extensions)
        .pick_files()
    else {
        state.message.set("Upload cancelled".to_string());
        return;
    };

    state.busy.set(true);
    match run_blocking("upload", || services.import.upload(kind, &paths)) {
        Ok(outcome) => {
            state.preview.set(outcome.preview);
            state.message.set(outcome.message);
            *state.revision.write() += 1;
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "upload failed");
            state.message.set(format!("Upload failed: {err}"));
        }
    }
    state.busy.set(false);
}

fn handle_reset(services: &Services, mut state: AppState) {
    match services.import.reset() {
        Ok(message) => {
            state.preview.set(Vec::new());
            state.message.set(message);
            *state.revision.write() += 1;
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "reset failed");
            state.message.set(format!("Reset failed: {err}"));
        }
    }
}

fn handle_export(services: &Services, mut state: AppState, view: ExportView, format: ExportFormat) {
    let file_name = default_file_name(view, format);
    let mut dialog = FileDialog::new()
        .set_file_name(file_name.clone())
        .add_filter(format.extension(), &[format.extension()]);
    if let Some(dir) = default_export_dir() {
        dialog = dialog.set_directory(dir);
    }
    let Some(path) = dialog.save_file() else {
        return;
    };

    let filter = date_filter(&state.start_date.read(), &state.end_date.read());
    match run_blocking("export", || {
        services.export.export_to_path(view, format, &filter, &path)
    }) {
        Ok(()) => state.message.set(format!("Exported {file_name}")),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "export failed");
            state.message.set(format!("Export failed: {err}"));
        }
    }
}

#[component]
pub fn App() -> Element {
    let services = use_hook(|| Services::new(DashboardConfig::default()));
    let state = AppState::new();
    let AppState {
        revision,
        mut table_query,
        mut start_date,
        mut end_date,
        preview,
        message,
        busy,
    } = state;

    let _ = revision();
    let filter = date_filter(&start_date(), &end_date());
    let views = match services.aggregate.views(&filter) {
        Ok(views) => views,
        Err(err) => {
            error!(error = %err, "failed to aggregate dataset");
            DashboardViews::default()
        }
    };
    let query = table_query();
    let search = query.search.clone();
    let sort = query.sort;
    let table_page = services.query.query_page(&query);

    let services_for_csv = services.clone();
    let services_for_xlsx = services.clone();
    let services_for_reset = services.clone();
    let services_for_export = services.clone();

    rsx! {
        div {
            style: "padding: 24px; display: grid; gap: 24px; font-family: sans-serif; background: #f7f7f7;",
            div {
                style: "display: flex; align-items: center; justify-content: space-between;",
                h1 { style: "font-size: 24px; margin: 0;", "{WINDOW_TITLE}" }
                div { style: "display: flex; gap: 8px;",
                    input {
                        r#type: "date",
                        value: "{start_date}",
                        oninput: move |event| start_date.set(event.value()),
                    }
                    input {
                        r#type: "date",
                        value: "{end_date}",
                        oninput: move |event| end_date.set(event.value()),
                    }
                    if filter.is_set() {
                        button {
                            onclick: move |_| {
                                start_date.set(String::new());
                                end_date.set(String::new());
                            },
                            "Clear"
                        }
                    }
                }
            }

            if !message().is_empty() {
                div { style: "padding: 8px; background: #dcfce7; color: #15803d; border-radius: 4px;", "{message}" }
            }

            div { style: "display: flex; gap: 16px; align-items: center; flex-wrap: wrap;",
                button {
                    disabled: busy(),
                    onclick: move |_| handle_upload(&services_for_csv, state, UploadKind::Csv),
                    "Upload CSV (multi)"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| handle_upload(&services_for_xlsx, state, UploadKind::Spreadsheet),
                    "Upload Excel (multi)"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| handle_reset(&services_for_reset, state),
                    "Reset"
                }
            }

            KpiCards { views: views.clone() }

            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px;",
                ChartCard {
                    title: "Campaign ROI Comparison",
                    view: ExportView::RoiSeries,
                    services: services_for_export.clone(),
                    state,
                    BarList { values: views.roi_series.clone(), suffix: "%" }
                }
                ChartCard {
                    title: "Campaign Performance Funnel",
                    view: ExportView::Funnel,
                    services: services_for_export.clone(),
                    state,
                    BarList {
                        values: views
                            .funnel
                            .iter()
                            .map(|stage| NamedValue {
                                name: stage.stage.label().to_string(),
                                value: stage.value as f64,
                            })
                            .collect::<Vec<_>>(),
                        suffix: "",
                    }
                }
                ChartCard {
                    title: "Revenue by Campaign Type",
                    view: ExportView::RevenueByType,
                    services: services_for_export.clone(),
                    state,
                    BarList { values: views.revenue_by_type.clone(), suffix: "$" }
                }
                ChartCard {
                    title: "Leads Generated Over Time",
                    view: ExportView::LeadsOverTime,
                    services: services_for_export.clone(),
                    state,
                    BarList {
                        values: views
                            .leads_over_time
                            .iter()
                            .map(|point| NamedValue {
                                name: point.date.clone(),
                                value: point.leads as f64,
                            })
                            .collect::<Vec<_>>(),
                        suffix: "",
                    }
                }
            }

            if !preview().is_empty() {
                PreviewTable { rows: preview() }
            }

            div { style: CARD_STYLE,
                div { style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 8px;",
                    h2 { style: "font-size: 18px; margin: 0;", "Campaign Performance Summary" }
                    div { style: "display: flex; gap: 8px; align-items: center;",
                        input {
                            placeholder: "Search campaigns...",
                            value: "{search}",
                            oninput: move |event| table_query.write().set_search(event.value()),
                        }
                        ExportButtons {
                            view: ExportView::Campaigns,
                            services: services_for_export.clone(),
                            state,
                        }
                    }
                }
                match table_page {
                    Ok(page) => rsx! {
                        CampaignTable { page, sort, table_query }
                    },
                    Err(err) => rsx! {
                        p { "Failed to load campaigns: {err}" }
                    },
                }
            }
        }
    }
}

#[component]
fn KpiCards(views: DashboardViews) -> Element {
    let kpis = views.kpis;
    let revenue = format_currency(kpis.revenue);
    let leads = format_count(kpis.leads);
    let cards = [
        ("Total Campaigns Active", kpis.total_campaigns.to_string()),
        ("Total Campaign Revenue", revenue),
        ("Average ROI", format!("{}%", kpis.blended_roi)),
        ("Total Leads Generated", leads),
    ];

    rsx! {
        div { style: "display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px;",
            {cards.into_iter().map(|(title, value)| rsx!(
                div { style: CARD_STYLE,
                    div { style: "font-size: 13px; color: #6b7280;", "{title}" }
                    div { style: "font-size: 20px; font-weight: 600;", "{value}" }
                }
            ))}
        }
    }
}

#[component]
fn ChartCard(
    title: &'static str,
    view: ExportView,
    services: Services,
    state: AppState,
    children: Element,
) -> Element {
    rsx! {
        div { style: CARD_STYLE,
            div { style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 8px;",
                h2 { style: "font-size: 18px; margin: 0;", "{title}" }
                ExportButtons { view, services, state }
            }
            {children}
        }
    }
}

#[component]
fn ExportButtons(view: ExportView, services: Services, state: AppState) -> Element {
    let services_for_xlsx = services.clone();
    rsx! {
        div { style: "display: flex; gap: 8px;",
            button {
                onclick: move |_| handle_export(&services, state, view, ExportFormat::Csv),
                "Export CSV"
            }
            button {
                onclick: move |_| handle_export(&services_for_xlsx, state, view, ExportFormat::Xlsx),
                "Export"
            }
        }
    }
}

/// Horizontal bars scaled to the largest value in the list.
#[component]
fn BarList(values: Vec<NamedValue>, suffix: &'static str) -> Element {
    let max = values
        .iter()
        .map(|item| item.value.abs())
        .fold(0.0_f64, f64::max);

    rsx! {
        div { style: "display: grid; gap: 4px;",
            {values.iter().map(|item| {
                let width = if max > 0.0 { (item.value.abs() / max * 100.0).round() } else { 0.0 };
                let label = match suffix {
                    "$" => format_currency(item.value),
                    "%" => format!("{}%", item.value),
                    _ => format_count(item.value.max(0.0) as u64),
                };
                let name = item.name.clone();
                rsx!(
                    div { style: "display: grid; grid-template-columns: 200px 1fr 90px; gap: 8px; align-items: center; font-size: 13px;",
                        span { style: "overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", "{name}" }
                        div { style: "background: #6366f1; height: 12px; width: {width}%;" }
                        span { "{label}" }
                    }
                )
            })}
        }
    }
}

#[component]
fn PreviewTable(rows: Vec<RawRow>) -> Element {
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.labels().map(str::to_string).collect())
        .unwrap_or_default();

    rsx! {
        div { style: "{CARD_STYLE} overflow: auto;",
            h2 { style: "font-size: 18px; margin: 0 0 8px 0;", "Uploaded Data Preview (first 10 rows)" }
            table { style: "border-collapse: collapse; font-size: 13px;",
                thead {
                    tr {
                        for column in columns.iter() {
                            th { style: CELL_STYLE, "{column}" }
                        }
                    }
                }
                tbody {
                    {rows.iter().map(|row| {
                        let cells: Vec<String> = columns
                            .iter()
                            .map(|column| row.get(column).map(|value| value.to_string()).unwrap_or_default())
                            .collect();
                        rsx!(
                            tr {
                                for cell in cells.into_iter() {
                                    td { style: CELL_STYLE, "{cell}" }
                                }
                            }
                        )
                    })}
                }
            }
        }
    }
}

fn status_style(status: &CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Active => "background: #dcfce7; color: #15803d;",
        CampaignStatus::Paused => "background: #fef9c3; color: #a16207;",
        _ => "background: #f3f4f6; color: #374151;",
    }
}

fn campaign_row(record: &CampaignRecord) -> Element {
    let name = record.name.clone();
    let campaign_type = record.campaign_type.clone();
    let status = record.status.label().to_string();
    let badge = status_style(&record.status);
    let leads = format_count(record.leads);
    let conversions = format_count(record.conversions);
    let cost = format_currency(record.cost);
    let revenue = format_currency(record.revenue);
    let roi = record.roi;

    rsx! {
        tr {
            td { style: CELL_STYLE, "{name}" }
            td { style: CELL_STYLE, "{campaign_type}" }
            td { style: CELL_STYLE,
                span { style: "padding: 2px 8px; border-radius: 9999px; font-size: 12px; {badge}", "{status}" }
            }
            td { style: CELL_STYLE, "{leads}" }
            td { style: CELL_STYLE, "{conversions}" }
            td { style: CELL_STYLE, "{cost}" }
            td { style: CELL_STYLE, "{revenue}" }
            td { style: CELL_STYLE, "{roi}%" }
        }
    }
}

#[component]
fn CampaignTable(
    page: TablePage,
    sort: SortSpec,
    table_query: Signal<TableQuery>,
) -> Element {
    let mut table_query = table_query;
    let (first, last) = page.showing_range();
    let total = page.total;
    let has_previous = page.has_previous();
    let has_next = page.has_next();

    rsx! {
        table { style: "width: 100%; border-collapse: collapse; font-size: 13px;",
            thead {
                tr {
                    {SortKey::ALL.into_iter().map(|key| {
                        let arrow = if sort.key == key { sort.direction.arrow() } else { "" };
                        let label = key.label();
                        let field = key.field();
                        rsx!(
                            th {
                                key: "{field}",
                                style: "{CELL_STYLE} cursor: pointer; user-select: none;",
                                onclick: move |_| table_query.write().toggle_sort(key),
                                "{label} {arrow}"
                            }
                        )
                    })}
                }
            }
            tbody {
                {page.rows.iter().map(campaign_row)}
            }
        }
        div { style: "display: flex; align-items: center; justify-content: space-between; margin-top: 12px; font-size: 13px;",
            span { "Showing {first}–{last} of {total}" }
            div { style: "display: flex; gap: 8px;",
                button {
                    disabled: !has_previous,
                    onclick: move |_| table_query.write().previous_page(),
                    "Previous"
                }
                button {
                    disabled: !has_next,
                    onclick: move |_| table_query.write().next_page(total),
                    "Next"
                }
            }
        }
    }
}
