#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use ddf_dashboard::config::DashboardConfig;
use ddf_dashboard::server::{AppState, build_router};

pub type SheetData = (&'static str, Vec<Vec<&'static str>>);

pub fn ddf_sheet() -> SheetData {
    (
        "DDF",
        vec![
            vec!["Layout", "Canvas width", "Canvas height", "Ratio", "Location"],
            vec!["CA_DM101", "1080", "1920", "0.5625", "Departures"],
            vec!["CB_DM202", "1920", "1080", "1.7778", "Arrivals"],
        ],
    )
}

pub fn categories_sheet() -> SheetData {
    (
        "Categories",
        vec![
            vec!["Category", "Layouts"],
            vec!["Liquor", "12"],
            vec!["Fragrance", "7"],
        ],
    )
}

pub fn electronics_sheet() -> SheetData {
    (
        "Electronics",
        vec![
            vec!["Layout", "Brand", "Zone"],
            vec!["EL_DM301", "Sony", ""],
            vec!["", "", ""],
            vec!["EL_DM302", "", "Zone B"],
        ],
    )
}

pub fn jcd_sheet() -> SheetData {
    (
        "JCD Screens",
        vec![
            vec!["Layout Name", "Dimensions", "Location"],
            vec!["JCD_01", "1920 x 1080", "Concourse A"],
            vec!["JCD_02", "1080X1920", "Concourse B"],
        ],
    )
}

pub fn vendor_sheet() -> SheetData {
    (
        "Vendor List",
        vec![
            vec!["Company", "Brand", "Country/City", "Zone"],
            vec!["Acme", "Roadrunner", "UAE/Dubai", "Zone A"],
            vec!["Globex", "Hank", "France/Paris", "Zone B"],
            vec!["Acme", "Coyote", "France/Paris", "Zone B"],
        ],
    )
}

pub fn promos_sheet() -> SheetData {
    (
        "Promos",
        vec![
            vec!["Brand", "Digital Media"],
            vec!["Roadrunner", "Screens"],
            vec!["Hank"],
            vec!["Coyote", "Billboards"],
        ],
    )
}

pub fn all_sheets() -> Vec<SheetData> {
    vec![
        ddf_sheet(),
        categories_sheet(),
        electronics_sheet(),
        jcd_sheet(),
        vendor_sheet(),
        promos_sheet(),
    ]
}

/// Every sheet except those whose name is listed.
pub fn sheets_without(names: &[&str]) -> Vec<SheetData> {
    all_sheets()
        .into_iter()
        .filter(|(name, _)| !names.contains(name))
        .collect()
}

/// Writes `sheets` to `path`. Cells that parse as numbers are stored as numbers.
pub fn write_workbook(path: &Path, sheets: &[SheetData]) {
    let mut workbook = Workbook::new();

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name");

        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, text) in row.iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
                let written = match text.parse::<f64>() {
                    Ok(number) => worksheet.write_number(row_idx, col_idx, number),
                    Err(_) => worksheet.write_string(row_idx, col_idx, *text),
                };
                written.expect("write cell");
            }
        }
    }

    workbook.save(path).expect("save workbook");
}

pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new(sheets: &[SheetData]) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("layouts.xlsx");
        write_workbook(&path, sheets);
        Self { dir, path }
    }

    /// A workbook path inside the temp dir that does not exist.
    pub fn missing() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.xlsx");
        Self { dir, path }
    }
}

pub async fn spawn_server(workbook: &Path) -> SocketAddr {
    let app = build_router(AppState::new(DashboardConfig::new(workbook)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

pub async fn send_raw(addr: SocketAddr, path: &str) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub async fn get_json(addr: SocketAddr, path: &str) -> (u16, serde_json::Value) {
    let (status, _, body) = send_raw(addr, path).await;
    let value = serde_json::from_str(&body).expect("json body");
    (status, value)
}
