use crate::domain::entities::campaign::{CampaignRecord, CampaignStatus, Dataset, TimeSeriesPoint};

const SAMPLE_TIME_SERIES: [(&str, u64); 8] = [
    ("2025-01-01", 120),
    ("2025-02-01", 180),
    ("2025-03-01", 240),
    ("2025-04-01", 310),
    ("2025-05-01", 360),
    ("2025-06-01", 400),
    ("2025-07-01", 430),
    ("2025-08-01", 420),
];

pub fn sample_time_series() -> Vec<TimeSeriesPoint> {
    SAMPLE_TIME_SERIES
        .iter()
        .map(|(date, leads)| TimeSeriesPoint::new(*date, *leads))
        .collect()
}

pub fn sample_campaigns() -> Vec<CampaignRecord> {
    use CampaignStatus::{Active, Completed, Paused};

    vec![
        CampaignRecord::new("Q4 Webinar Series", "Webinar", Active, 320, 18, 3000.0, 125000.0),
        CampaignRecord::new(
            "Email Campaign - Product Launch",
            "Email",
            Completed,
            580,
            43,
            7000.0,
            310000.0,
        ),
        CampaignRecord::new(
            "Trade Show - TechConf 2025",
            "Event",
            Completed,
            94,
            9,
            30000.0,
            94000.0,
        ),
        CampaignRecord::new(
            "Social Media - Brand Awareness",
            "Social Media",
            Active,
            450,
            11,
            67000.0,
            67000.0,
        ),
        CampaignRecord::new(
            "PPC - Lead Generation",
            "Paid Search",
            Active,
            380,
            29,
            18000.0,
            185000.0,
        ),
        CampaignRecord::new(
            "Content Marketing - Blog Series",
            "Content",
            Active,
            275,
            16,
            10000.0,
            89000.0,
        ),
        CampaignRecord::new(
            "Partner Channel - Referrals",
            "Partner",
            Active,
            125,
            22,
            4000.0,
            185000.0,
        ),
        CampaignRecord::new(
            "Retargeting Campaign",
            "Display Ads",
            Paused,
            196,
            7,
            7000.0,
            42000.0,
        ),
    ]
}

pub fn sample_dataset() -> Dataset {
    Dataset {
        campaigns: sample_campaigns(),
        time_series: sample_time_series(),
    }
}
