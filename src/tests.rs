use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use crate::config::{DashboardConfig, FunnelRatios};
use crate::domain::entities::campaign::{
    roi_percent, round_half_up, CampaignRecord, CampaignStatus, FunnelCounts, TimeSeriesPoint,
};
use crate::domain::entities::raw::{RawRow, RawValue};
use crate::domain::entities::view::{
    DateRangeFilter, FunnelStage, PageWindow, SortDirection, SortKey, SortSpec, TableQuery,
};
use crate::domain::sample::{sample_campaigns, sample_dataset, sample_time_series};
use crate::infra::export::csv::write_csv_bytes;
use crate::infra::export::xlsx::write_xlsx_bytes;
use crate::infra::import::csv::{parse_csv_file, parse_csv_reader};
use crate::infra::import::xlsx::parse_xlsx_file;
use crate::infra::memory::store::MemoryStore;
use crate::usecase::normalize::{classify, map_campaigns, map_time_series, normalize, UploadShape};
use crate::usecase::ports::store::DatasetStore;
use crate::usecase::services::aggregate_service::{
    funnel_totals, kpi_totals, leads_over_time, revenue_by_type, roi_series,
};
use crate::usecase::services::export_service::{
    campaign_table, default_file_name, leads_table, ExportFormat, ExportService, ExportView,
};
use crate::usecase::services::import_service::{ImportService, ParsedBatch, UploadKind};
use crate::usecase::services::query_service::{project_table, QueryService};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("campaign-dashboard-{prefix}-{nanos}"))
}

fn sample_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(sample_dataset()))
}

fn import_service(store: Arc<MemoryStore>) -> ImportService {
    ImportService::new(store, DashboardConfig::default())
}

fn campaign(name: &str, campaign_type: &str, leads: u64, cost: f64, revenue: f64) -> CampaignRecord {
    CampaignRecord::new(
        name,
        campaign_type,
        CampaignStatus::Active,
        leads,
        0,
        cost,
        revenue,
    )
}

fn names(records: &[CampaignRecord]) -> Vec<&str> {
    records.iter().map(|record| record.name.as_str()).collect()
}

#[test]
fn roi_matches_definition_for_every_sample_campaign() {
    for record in sample_campaigns() {
        let expected = ((record.revenue - record.cost) / record.cost * 100.0).round() as i64;
        assert_eq!(record.roi, expected, "roi mismatch for {}", record.name);
    }

    assert_eq!(roi_percent(500.0, 0.0), 0, "zero cost should give zero roi");
    assert_eq!(roi_percent(0.0, 100.0), -100);
}

#[test]
fn halves_round_toward_positive_infinity() {
    assert_eq!(round_half_up(-0.5), 0.0);
    assert_eq!(round_half_up(0.5), 1.0);
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-1.5), -1.0);
}

#[test]
fn blended_roi_uses_totals_not_mean_of_rois() {
    let records = vec![
        campaign("A", "Email", 0, 100.0, 200.0),
        campaign("B", "Email", 0, 300.0, 300.0),
    ];
    let mean = (records[0].roi + records[1].roi) / 2;

    let kpis = kpi_totals(&records);

    assert_eq!(kpis.blended_roi, 25);
    assert_eq!(mean, 50);
    assert_ne!(kpis.blended_roi, mean);
}

#[test]
fn kpi_totals_for_sample_data() {
    let kpis = kpi_totals(&sample_campaigns());

    assert_eq!(kpis.total_campaigns, 8);
    assert_eq!(kpis.revenue, 1_097_000.0);
    assert_eq!(kpis.cost, 146_000.0);
    assert_eq!(kpis.leads, 2420);
    assert_eq!(kpis.blended_roi, 651);
}

#[test]
fn kpi_totals_for_empty_dataset_are_zero() {
    let kpis = kpi_totals(&[]);

    assert_eq!(kpis.total_campaigns, 0);
    assert_eq!(kpis.blended_roi, 0);
}

#[test]
fn roi_series_preserves_record_order() {
    let series = roi_series(&sample_campaigns());

    assert_eq!(series.len(), 8);
    assert_eq!(series[0].name, "Q4 Webinar Series");
    assert_eq!(series[0].value, 4067.0);
    assert_eq!(series[7].name, "Retargeting Campaign");
    assert_eq!(series[7].value, 500.0);
}

#[test]
fn revenue_by_type_groups_in_first_seen_order() {
    let records = vec![
        campaign("one", "Email", 0, 0.0, 100.0),
        campaign("two", "Social", 0, 0.0, 30.0),
        campaign("three", "Email", 0, 0.0, 50.0),
        campaign("four", "", 0, 0.0, 7.0),
    ];

    let grouped = revenue_by_type(&records);

    let pairs: Vec<(&str, f64)> = grouped
        .iter()
        .map(|item| (item.name.as_str(), item.value))
        .collect();
    assert_eq!(pairs, vec![("Email", 150.0), ("Social", 30.0), ("Other", 7.0)]);
}

#[test]
fn funnel_rounds_each_campaign_before_summing() {
    let records = vec![campaign("a", "x", 3, 0.0, 0.0), campaign("b", "x", 3, 0.0, 0.0)];

    let funnel = funnel_totals(&records, &FunnelRatios::default());

    let values: Vec<u64> = funnel.iter().map(|stage| stage.value).collect();
    assert_eq!(values, vec![6, 4, 2, 2, 0]);
    assert_ne!(values[3], (6.0_f64 * 0.20).round() as u64);
    let stages: Vec<FunnelStage> = funnel.iter().map(|stage| stage.stage).collect();
    assert_eq!(stages, FunnelStage::ORDER.to_vec());
}

#[test]
fn funnel_prefers_explicit_counts_then_conversions() {
    let mut record = campaign("explicit", "x", 100, 0.0, 0.0).with_funnel(FunnelCounts {
        mqls: Some(70),
        sqls: Some(0),
        opportunities: None,
        closed: None,
    });
    record.conversions = 9;

    let funnel = funnel_totals(&[record], &FunnelRatios::default());

    let values: Vec<u64> = funnel.iter().map(|stage| stage.value).collect();
    assert_eq!(values, vec![100, 70, 35, 20, 9]);
}

#[test]
fn search_matches_name_case_insensitively_only() {
    let mut records = sample_campaigns();
    records.push(campaign("Spring Launch", "Webinar", 10, 1.0, 1.0));
    let mut query = TableQuery::new(8);
    query.set_search("webinar");

    let page = project_table(&records, &query);

    assert_eq!(page.total, 1);
    assert_eq!(names(&page.rows), vec!["Q4 Webinar Series"]);
}

#[test]
fn empty_search_matches_everything() {
    let mut query = TableQuery::new(8);
    query.set_search("   ");

    let page = project_table(&sample_campaigns(), &query);

    assert_eq!(page.total, 8);
}

#[test]
fn sort_toggle_flips_same_key_and_resets_new_key() {
    let spec = SortSpec::default();
    assert_eq!(spec.key, SortKey::Campaign);
    assert_eq!(spec.direction, SortDirection::Asc);

    let flipped = spec.toggled(SortKey::Campaign);
    assert_eq!(flipped.direction, SortDirection::Desc);

    let back = flipped.toggled(SortKey::Campaign);
    assert_eq!(back.direction, SortDirection::Asc);

    let other = flipped.toggled(SortKey::Revenue);
    assert_eq!(other.key, SortKey::Revenue);
    assert_eq!(other.direction, SortDirection::Asc);
}

#[test]
fn search_resets_page_but_sort_does_not() {
    let mut query = TableQuery::new(8);
    query.window.page = 3;

    query.toggle_sort(SortKey::Leads);
    assert_eq!(query.window.page, 3, "sorting should keep the current page");

    query.set_search("ppc");
    assert_eq!(query.window.page, 1, "searching should return to page one");
}

#[test]
fn sort_by_roi_descending_puts_highest_first() {
    let mut query = TableQuery::new(8);
    query.toggle_sort(SortKey::Roi);
    query.toggle_sort(SortKey::Roi);

    let page = project_table(&sample_campaigns(), &query);

    assert_eq!(query.sort.direction, SortDirection::Desc);
    assert_eq!(
        names(&page.rows),
        vec![
            "Partner Channel - Referrals",
            "Email Campaign - Product Launch",
            "Q4 Webinar Series",
            "PPC - Lead Generation",
            "Content Marketing - Blog Series",
            "Retargeting Campaign",
            "Trade Show - TechConf 2025",
            "Social Media - Brand Awareness",
        ]
    );
}

#[test]
fn sort_keeps_dataset_order_for_equal_values() {
    let records = vec![
        campaign("c", "x", 5, 0.0, 0.0),
        campaign("a", "x", 1, 0.0, 0.0),
        campaign("b", "x", 5, 0.0, 0.0),
    ];
    let mut query = TableQuery::new(8);
    query.toggle_sort(SortKey::Leads);

    let ascending = project_table(&records, &query);
    query.toggle_sort(SortKey::Leads);
    let descending = project_table(&records, &query);

    assert_eq!(names(&ascending.rows), vec!["a", "c", "b"]);
    assert_eq!(names(&descending.rows), vec!["c", "b", "a"]);
}

#[test]
fn sort_by_text_column_is_lexical() {
    let mut query = TableQuery::new(8);
    query.toggle_sort(SortKey::Status);

    let page = project_table(&sample_campaigns(), &query);

    let statuses: Vec<&str> = page.rows.iter().map(|r| r.status.label()).collect();
    assert_eq!(statuses.first(), Some(&"ACTIVE"));
    assert_eq!(statuses.last(), Some(&"PAUSED"));
}

#[test]
fn pagination_third_page_of_twenty_rows() {
    let records: Vec<CampaignRecord> = (1..=20)
        .map(|idx| campaign(&format!("Campaign {idx:02}"), "x", idx, 0.0, 0.0))
        .collect();
    let mut query = TableQuery::new(8);
    query.window = PageWindow::new(3, 8);

    let page = project_table(&records, &query);

    assert_eq!(page.total, 20);
    assert_eq!(
        names(&page.rows),
        vec!["Campaign 17", "Campaign 18", "Campaign 19", "Campaign 20"]
    );
    assert!(!page.has_next(), "last page should disable next");
    assert!(page.has_previous());
    assert_eq!(page.showing_range(), (17, 20));
}

#[test]
fn pagination_with_sixteen_rows_on_page_two_has_no_next() {
    let records: Vec<CampaignRecord> = (1..=16)
        .map(|idx| campaign(&format!("c{idx:02}"), "x", idx, 0.0, 0.0))
        .collect();
    let mut query = TableQuery::new(8);

    query.next_page(records.len());
    let page = project_table(&records, &query);
    assert_eq!(query.window.page, 2);
    assert_eq!(page.rows.len(), 8);
    assert!(!page.has_next());

    query.next_page(records.len());
    assert_eq!(query.window.page, 2, "next should not move past the last page");

    query.previous_page();
    query.previous_page();
    assert_eq!(query.window.page, 1, "previous should stop at page one");
}

#[test]
fn page_past_the_end_is_empty() {
    let mut query = TableQuery::new(8);
    query.window = PageWindow::new(5, 8);

    let page = project_table(&sample_campaigns(), &query);

    assert!(page.rows.is_empty());
    assert_eq!(page.total, 8);
}

#[test]
fn date_filter_with_start_only_keeps_points_on_or_after() {
    let filter = DateRangeFilter {
        start: NaiveDate::from_ymd_opt(2025, 3, 1),
        end: None,
    };

    let points = leads_over_time(&sample_time_series(), &filter);

    assert_eq!(points.len(), 6);
    assert_eq!(points[0].date, "2025-03-01");
}

#[test]
fn date_filter_bounds_are_inclusive() {
    let filter = DateRangeFilter {
        start: NaiveDate::from_ymd_opt(2025, 2, 1),
        end: NaiveDate::from_ymd_opt(2025, 4, 1),
    };

    let points = leads_over_time(&sample_time_series(), &filter);

    let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-02-01", "2025-03-01", "2025-04-01"]);
}

#[test]
fn date_filter_without_bounds_keeps_everything() {
    let mut series = sample_time_series();
    series.push(TimeSeriesPoint::new("not a date", 3));

    let points = leads_over_time(&series, &DateRangeFilter::default());

    assert_eq!(points.len(), 9);

    let filter = DateRangeFilter {
        start: NaiveDate::from_ymd_opt(2030, 1, 1),
        end: None,
    };
    let points = leads_over_time(&series, &filter);
    assert_eq!(points.len(), 1, "unparsable dates are never excluded");
}

#[test]
fn classify_detects_shapes_by_key_presence() {
    let time_series = vec![
        RawRow::new().with("date", RawValue::Text("2025-01-01".into())),
        RawRow::new().with("leads", RawValue::Number(3.0)),
    ];
    let campaign_only = vec![RawRow::new().with("Campaign", RawValue::Text("x".into()))];
    let both = vec![RawRow::new()
        .with("campaign", RawValue::Text("x".into()))
        .with("date", RawValue::Text("2025-01-01".into()))
        .with("leads", RawValue::Number(1.0))];
    let neither = vec![RawRow::new().with("name", RawValue::Text("x".into()))];

    assert_eq!(classify(&time_series), UploadShape::TimeSeries);
    assert_eq!(classify(&campaign_only), UploadShape::Campaign);
    assert_eq!(classify(&both), UploadShape::Both);
    assert_eq!(classify(&neither), UploadShape::Neither);
    assert_eq!(classify(&[]), UploadShape::Neither);
}

#[test]
fn campaign_mapping_applies_aliases_and_defaults() {
    let rows = vec![
        RawRow::new()
            .with("Campaign", RawValue::Text("Beta".into()))
            .with("Cost", RawValue::Text("n/a".into()))
            .with("Revenue", RawValue::Number(50.0))
            .with("Leads", RawValue::Text(" 12 ".into())),
        RawRow::new()
            .with("campaign", RawValue::Text("Gamma".into()))
            .with("type", RawValue::Text("Email".into()))
            .with("status", RawValue::Text("paused".into()))
            .with("cost", RawValue::Number(10.0))
            .with("revenue", RawValue::Number(25.0))
            .with("mqls", RawValue::Number(4.0)),
        RawRow::new().with("campaign", RawValue::Empty),
    ];

    let mapped = map_campaigns(&rows);

    assert_eq!(mapped.len(), 2, "rows without a name should be skipped");
    assert_eq!(mapped[0].name, "Beta");
    assert_eq!(mapped[0].campaign_type, "Other");
    assert_eq!(mapped[0].status, CampaignStatus::Active);
    assert_eq!(mapped[0].cost, 0.0);
    assert_eq!(mapped[0].leads, 12);
    assert_eq!(mapped[0].roi, 0);
    assert_eq!(mapped[1].status, CampaignStatus::Other("paused".to_string()));
    assert_eq!(mapped[1].status.label(), "paused");
    assert_eq!(mapped[1].roi, 150);
    assert_eq!(mapped[1].funnel.mqls, Some(4));
    assert_eq!(mapped[1].funnel.closed, None);
}

#[test]
fn unknown_status_is_kept_verbatim() {
    let rows = vec![RawRow::new()
        .with("campaign", RawValue::Text("x".into()))
        .with("Status", RawValue::Text("Draft".into()))];

    let mapped = map_campaigns(&rows);

    assert_eq!(mapped[0].status, CampaignStatus::Other("Draft".to_string()));
    assert_eq!(mapped[0].status.label(), "Draft");
}

#[test]
fn time_series_mapping_truncates_dates_and_defaults_leads() {
    let rows = parse_csv_reader(
        "date,leads\n2025-01-15T10:00:00Z,12\n,40\n2025-02-01,abc\n".as_bytes(),
    )
    .expect("csv should parse");

    let points = map_time_series(&rows);

    assert_eq!(
        points,
        vec![
            TimeSeriesPoint::new("2025-01-15", 12),
            TimeSeriesPoint::new("2025-02-01", 0),
        ]
    );
}

#[test]
fn normalize_reports_none_for_empty_mapped_collections() {
    let rows = vec![RawRow::new()
        .with("campaign", RawValue::Empty)
        .with("date", RawValue::Empty)
        .with("leads", RawValue::Number(1.0))];

    let (shape, normalized) = normalize(&rows);

    assert_eq!(shape, UploadShape::Both);
    assert!(normalized.campaigns.is_none());
    assert!(normalized.time_series.is_none());
}

#[test]
fn csv_parse_coerces_numbers_and_keeps_text() {
    let rows = parse_csv_reader(
        "campaign,type,leads,cost,active\nAlpha,Email,10,99.5,true\n".as_bytes(),
    )
    .expect("csv should parse");

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("campaign"), Some(&RawValue::Text("Alpha".into())));
    assert_eq!(row.get("leads"), Some(&RawValue::Number(10.0)));
    assert_eq!(row.get("cost"), Some(&RawValue::Number(99.5)));
    assert_eq!(row.get("active"), Some(&RawValue::Bool(true)));
    let labels: Vec<&str> = row.labels().collect();
    assert_eq!(labels, vec!["campaign", "type", "leads", "cost", "active"]);
}

#[test]
fn csv_file_that_does_not_exist_is_an_error() {
    let missing = unique_test_dir("missing").join("nope.csv");

    let result = parse_csv_file(&missing);

    assert!(result.is_err());
}

#[test]
fn xlsx_parse_reads_first_sheet_only() {
    let temp_dir = unique_test_dir("xlsx-first-sheet");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let xlsx_path = temp_dir.join("campaigns.xlsx");

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "campaign").expect("header");
        sheet.write_string(0, 1, "leads").expect("header");
        sheet.write_string(0, 2, "type").expect("header");
        sheet.write_string(1, 0, "Alpha").expect("cell");
        sheet.write_number(1, 1, 120.0).expect("cell");
        sheet.write_string(2, 0, "Beta").expect("cell");
        sheet.write_number(2, 1, 30.0).expect("cell");
        sheet.write_string(2, 2, "Event").expect("cell");
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "date").expect("header");
        sheet.write_string(1, 0, "2025-01-01").expect("cell");
    }
    workbook.save(&xlsx_path).expect("should write xlsx fixture");

    let rows = parse_xlsx_file(&xlsx_path).expect("xlsx should parse");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("campaign"), Some(&RawValue::Text("Alpha".into())));
    assert_eq!(rows[0].get("leads"), Some(&RawValue::Number(120.0)));
    assert!(!rows[0].contains_key("type"), "blank cells should be omitted");
    assert_eq!(rows[1].get("type"), Some(&RawValue::Text("Event".into())));
    assert!(rows.iter().all(|row| !row.contains_key("date")));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn xlsx_date_cells_map_to_iso_days() {
    let temp_dir = unique_test_dir("xlsx-dates");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let xlsx_path = temp_dir.join("series.xlsx");
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let day = ExcelDateTime::from_ymd(2025, 1, 1).expect("valid date");

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "date").expect("header");
        sheet.write_string(0, 1, "leads").expect("header");
        sheet
            .write_datetime_with_format(1, 0, &day, &date_format)
            .expect("cell");
        sheet.write_number(1, 1, 42.0).expect("cell");
    }
    workbook.save(&xlsx_path).expect("should write xlsx fixture");

    let rows = parse_xlsx_file(&xlsx_path).expect("xlsx should parse");

    assert!(matches!(rows[0].get("date"), Some(RawValue::DateTime(_))));
    assert_eq!(
        map_time_series(&rows),
        vec![TimeSeriesPoint::new("2025-01-01", 42)]
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_rows_with_empty_fields_count_toward_upload() {
    let temp_dir = unique_test_dir("csv-empty-fields");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("campaigns.csv");
    fs::write(&csv_path, "campaign,leads\nA,1\n,\nB,2\n").expect("should write csv fixture");

    let service = import_service(sample_store());
    let outcome = service
        .upload(UploadKind::Csv, &[csv_path])
        .expect("upload should succeed");

    assert_eq!(outcome.row_count, 3);
    assert_eq!(outcome.message, "Uploaded 3 rows");
    assert_eq!(outcome.preview.len(), 3);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_campaign_names_keep_their_text() {
    let rows = parse_csv_reader("campaign,leads\nTrue,3\n  ,4\n".as_bytes())
        .expect("csv should parse");

    let mapped = map_campaigns(&rows);

    assert_eq!(names(&mapped), vec!["True", "  "]);
}

#[test]
fn empty_csv_file_is_not_a_failure() {
    let temp_dir = unique_test_dir("csv-empty-file");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let empty = temp_dir.join("empty.csv");
    let header_only = temp_dir.join("header.csv");
    fs::write(&empty, "").expect("should write csv fixture");
    fs::write(&header_only, "campaign,leads\n").expect("should write csv fixture");

    let service = import_service(sample_store());
    let outcome = service
        .upload(UploadKind::Csv, &[empty, header_only])
        .expect("upload should succeed");

    assert_eq!(outcome.failed_files, 0);
    assert_eq!(outcome.message, "Uploaded 0 rows");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn parse_batch_concatenates_in_selection_order_and_skips_failures() {
    let temp_dir = unique_test_dir("batch-order");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let first = temp_dir.join("first.csv");
    let missing = temp_dir.join("missing.csv");
    let third = temp_dir.join("third.csv");
    fs::write(&first, "campaign,leads\nA1,1\nA2,2\n").expect("should write csv fixture");
    fs::write(&third, "campaign,leads\nC1,3\n").expect("should write csv fixture");

    let service = import_service(sample_store());
    let batch = service.parse_batch(UploadKind::Csv, &[first, missing, third]);

    let names: Vec<String> = batch
        .rows
        .iter()
        .map(|row| row.get("campaign").map(|v| v.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["A1", "A2", "C1"]);
    assert_eq!(batch.failed_files, 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn preview_takes_five_rows_per_file_and_ten_overall() {
    let temp_dir = unique_test_dir("preview");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let mut paths = Vec::new();
    for file_idx in 0..3 {
        let path = temp_dir.join(format!("part{file_idx}.csv"));
        let mut body = String::from("campaign,leads\n");
        for row_idx in 0..7 {
            body.push_str(&format!("f{file_idx}r{row_idx},{row_idx}\n"));
        }
        fs::write(&path, body).expect("should write csv fixture");
        paths.push(path);
    }

    let service = import_service(sample_store());
    let batch = service.parse_batch(UploadKind::Csv, &paths);

    assert_eq!(batch.rows.len(), 21);
    assert_eq!(batch.preview.len(), 10);
    assert_eq!(
        batch.preview[5].get("campaign"),
        Some(&RawValue::Text("f1r0".into()))
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn campaign_upload_leaves_time_series_untouched() {
    let temp_dir = unique_test_dir("campaign-upload");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("campaigns.csv");
    fs::write(
        &csv_path,
        "campaign,type,leads,cost,revenue\nAlpha,Email,10,100,200\n",
    )
    .expect("should write csv fixture");

    let store = sample_store();
    let service = import_service(store.clone());
    let outcome = service
        .upload(UploadKind::Csv, &[csv_path])
        .expect("upload should succeed");

    assert_eq!(outcome.shape, UploadShape::Campaign);
    assert!(outcome.campaigns_replaced);
    assert!(!outcome.time_series_replaced);
    assert_eq!(outcome.message, "Uploaded 1 rows");

    let dataset = store.snapshot().expect("snapshot should succeed");
    assert_eq!(names(&dataset.campaigns), vec!["Alpha"]);
    assert_eq!(dataset.campaigns[0].roi, 100);
    assert_eq!(dataset.time_series, sample_time_series());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn time_series_upload_leaves_campaigns_untouched() {
    let temp_dir = unique_test_dir("series-upload");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("series.csv");
    fs::write(&csv_path, "date,leads\n2025-09-01,50\n2025-10-01,70\n")
        .expect("should write csv fixture");

    let store = sample_store();
    let service = import_service(store.clone());
    let outcome = service
        .upload(UploadKind::Csv, &[csv_path])
        .expect("upload should succeed");

    assert_eq!(outcome.shape, UploadShape::TimeSeries);
    let dataset = store.snapshot().expect("snapshot should succeed");
    assert_eq!(dataset.campaigns, sample_campaigns());
    assert_eq!(
        dataset.time_series,
        vec![
            TimeSeriesPoint::new("2025-09-01", 50),
            TimeSeriesPoint::new("2025-10-01", 70),
        ]
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn upload_with_no_mappable_rows_keeps_prior_dataset() {
    let store = sample_store();
    let service = import_service(store.clone());
    let batch = ParsedBatch {
        rows: vec![RawRow::new().with("campaign", RawValue::Empty)],
        preview: Vec::new(),
        failed_files: 2,
    };

    let outcome = service.apply_rows(batch).expect("apply should succeed");

    assert_eq!(outcome.shape, UploadShape::Campaign);
    assert!(!outcome.campaigns_replaced);
    assert_eq!(outcome.message, "Uploaded 1 rows (2 files could not be read)");
    assert_eq!(
        store.snapshot().expect("snapshot should succeed"),
        sample_dataset()
    );
}

#[test]
fn reset_restores_sample_dataset() {
    let store = sample_store();
    store
        .replace_campaigns(vec![campaign("only", "x", 1, 1.0, 1.0)])
        .expect("replace should succeed");
    store
        .replace_time_series(Vec::new())
        .expect("replace should succeed");

    let service = import_service(store.clone());
    let message = service.reset().expect("reset should succeed");

    assert_eq!(message, "Reset to sample data");
    assert_eq!(
        store.snapshot().expect("snapshot should succeed"),
        sample_dataset()
    );
}

#[test]
fn query_service_reads_current_store_contents() {
    let store = sample_store();
    let service = QueryService::new(store.clone());

    store
        .replace_campaigns(vec![campaign("fresh", "x", 1, 1.0, 1.0)])
        .expect("replace should succeed");
    let page = service
        .query_page(&TableQuery::new(8))
        .expect("query should succeed");

    assert_eq!(names(&page.rows), vec!["fresh"]);
}

#[test]
fn campaign_table_csv_export_round_trips() {
    let campaigns = sample_campaigns();
    let bytes = write_csv_bytes(&campaign_table(&campaigns)).expect("export should succeed");

    let rows = parse_csv_reader(bytes.as_slice()).expect("export should re-parse");

    assert_eq!(map_campaigns(&rows), campaigns);
}

#[test]
fn leads_csv_export_round_trips() {
    let points = sample_time_series();
    let table = leads_table(&points);
    let bytes = write_csv_bytes(&table).expect("export should succeed");

    let rows = parse_csv_reader(bytes.as_slice()).expect("export should re-parse");

    assert_eq!(rows, table.to_raw_rows());
    assert_eq!(map_time_series(&rows), points);
}

#[test]
fn campaign_table_xlsx_export_round_trips() {
    let temp_dir = unique_test_dir("xlsx-export");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let xlsx_path = temp_dir.join("campaigns.xlsx");
    let campaigns = sample_campaigns();

    let bytes = write_xlsx_bytes(&campaign_table(&campaigns)).expect("export should succeed");
    fs::write(&xlsx_path, bytes).expect("should write export");
    let rows = parse_xlsx_file(&xlsx_path).expect("export should re-parse");

    assert_eq!(map_campaigns(&rows), campaigns);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn export_service_uses_current_data_and_filter() {
    let temp_dir = unique_test_dir("export-service");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let store = sample_store();
    let service = ExportService::new(store.clone(), FunnelRatios::default());
    let filter = DateRangeFilter {
        start: NaiveDate::from_ymd_opt(2025, 7, 1),
        end: None,
    };

    let leads = service
        .table(ExportView::LeadsOverTime, &filter)
        .expect("table should build");
    assert_eq!(leads.columns, vec!["date", "leads"]);
    assert_eq!(leads.rows.len(), 2);

    let roi = service
        .table(ExportView::RoiSeries, &filter)
        .expect("table should build");
    assert_eq!(roi.columns, vec!["campaign", "roi"]);
    assert_eq!(roi.rows.len(), 8, "roi export ignores the date filter");

    store
        .replace_campaigns(vec![campaign("later", "Email", 4, 10.0, 20.0)])
        .expect("replace should succeed");
    let path = temp_dir.join(default_file_name(ExportView::RevenueByType, ExportFormat::Csv));
    service
        .export_to_path(ExportView::RevenueByType, ExportFormat::Csv, &filter, &path)
        .expect("export should be written");
    let written = fs::read_to_string(&path).expect("should read export");
    assert_eq!(written, "name,value\nEmail,20\n");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn funnel_export_lists_stages_in_order() {
    let service = ExportService::new(sample_store(), FunnelRatios::default());

    let table = service
        .table(ExportView::Funnel, &DateRangeFilter::default())
        .expect("table should build");

    let stages: Vec<String> = table.rows.iter().map(|row| row[0].to_string()).collect();
    assert_eq!(
        stages,
        vec!["Leads", "MQLs", "SQLs", "Opportunities", "Closed Won"]
    );
    assert_eq!(table.rows[0][1], RawValue::Number(2420.0));
}

#[test]
fn default_file_names_match_views() {
    assert_eq!(
        default_file_name(ExportView::RoiSeries, ExportFormat::Csv),
        "roi_bar.csv"
    );
    assert_eq!(
        default_file_name(ExportView::Campaigns, ExportFormat::Xlsx),
        "campaigns.xlsx"
    );
    assert_eq!(
        default_file_name(ExportView::LeadsOverTime, ExportFormat::Xlsx),
        "leads_over_time.xlsx"
    );
}
