use serde::Serialize;

/// Flat per-event row for export files.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub id: i64,
    pub driver: String,
    pub log_date: String,
    pub time: String,
    pub status: String,
    pub location: Option<String>,
    pub odometer: Option<f64>,
    pub engine_hours: Option<f64>,
    pub device_id: Option<String>,
    pub client_event_id: String,
}

/// Header for CSV / JSON / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "driver",
        "log_date",
        "time",
        "status",
        "location",
        "odometer",
        "engine_hours",
        "device_id",
        "client_event_id",
    ]
}

/// Convert one event into a row of display strings (for XLSX).
pub(crate) fn event_to_row(e: &EventExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.driver.clone(),
        e.log_date.clone(),
        e.time.clone(),
        e.status.clone(),
        e.location.clone().unwrap_or_default(),
        e.odometer.map(|v| v.to_string()).unwrap_or_default(),
        e.engine_hours.map(|v| v.to_string()).unwrap_or_default(),
        e.device_id.clone().unwrap_or_default(),
        e.client_event_id.clone(),
    ]
}
