pub const AWAIR_LATEST: &str = r#"
{
    "data": [
        {
            "timestamp": "2024-01-01T00:00:00Z",
            "score": 85,
            "sensors": [
                {"comp": "co2", "value": 450},
                {"comp": "voc", "value": 120},
                {"comp": "lux", "value": 210.5}
            ],
            "indices": [
                {"comp": "co2", "value": 0}
            ]
        }
    ]
}
"#;

pub const KAITERRA_LATEST: &str = r#"
{
    "id": "k-1",
    "latest": {
        "time": "2024-01-01T00:05:00Z",
        "data": [
            {"param": "pm25", "value": 12.3, "units": "µg/m³"}
        ],
        "aqi": [
            {"param": "pm25", "value": 41}
        ]
    }
}
"#;
