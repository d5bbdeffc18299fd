mod support;

use serde_json::json;

use ddf_dashboard::client::DashboardClient;
use ddf_dashboard::dataset::Dataset;
use ddf_dashboard::error::DashboardError;
use ddf_dashboard::table::{BusinessField, TableConfig, ViewState};

use support::{Fixture, all_sheets, sheets_without, spawn_server};

/// Runs `check` with a blocking client pointed at a fresh server for `fixture`.
async fn with_client<F>(fixture: &Fixture, check: F)
where
    F: FnOnce(DashboardClient) + Send + 'static,
{
    let addr = spawn_server(&fixture.path).await;
    let base = format!("http://{addr}");
    tokio::task::spawn_blocking(move || {
        let client = DashboardClient::new(&base).expect("client");
        check(client);
    })
    .await
    .expect("blocking check");
}

fn load(client: &DashboardClient, dataset: Dataset) -> ViewState {
    ViewState::from_fetch(TableConfig::for_dataset(dataset), client.fetch_rows(dataset))
}

#[tokio::test(flavor = "multi_thread")]
async fn layouts_view_renames_sorts_and_links() {
    let fixture = Fixture::new(&all_sheets());
    with_client(&fixture, |client| {
        let state = load(&client, Dataset::Layouts);
        let table = state.controller().expect("layouts loaded");

        assert_eq!(table.columns()[0], "Layout Name");
        let view = table.view();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0]["Layout Name"], json!("CA_DM101"));
        assert_eq!(table.format_cell(view[0], "Ratio"), "0.56");
        assert_eq!(table.detail_target(view[0]).as_deref(), Some("CA_DM101"));
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_sheet_becomes_error_state() {
    let fixture = Fixture::new(&sheets_without(&["JCD Screens"]));
    with_client(&fixture, |client| {
        match load(&client, Dataset::Jcd) {
            ViewState::Failed(message) => assert_eq!(message, "JCD sheet not found"),
            other => panic!("expected failure, got {other:?}"),
        }
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn vendor_dropdowns_narrow_the_view() {
    let fixture = Fixture::new(&all_sheets());
    with_client(&fixture, |client| {
        let mut state = load(&client, Dataset::VendorList);
        let table = state.controller_mut().expect("vendors loaded");

        assert_eq!(
            table.dropdown_options(BusinessField::Company),
            vec!["Acme".to_string(), "Globex".to_string()]
        );

        table.set_dropdown(BusinessField::Company, Some("Acme".into()));
        assert_eq!(table.view().len(), 2);

        table.set_dropdown(BusinessField::Country, Some("France/Paris".into()));
        let view = table.view();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0]["Brand"], json!("Coyote"));

        table.clear_filters();
        assert_eq!(table.summary().filtered_rows, 3);
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn promos_put_missing_media_last() {
    let fixture = Fixture::new(&all_sheets());
    with_client(&fixture, |client| {
        let state = load(&client, Dataset::Promos);
        let table = state.controller().expect("promos loaded");

        let brands: Vec<_> = table
            .view()
            .iter()
            .map(|row| row["Brand"].clone())
            .collect();
        assert_eq!(brands, vec![json!("Coyote"), json!("Roadrunner"), json!("Hank")]);
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn layout_detail_carries_preview_size() {
    let fixture = Fixture::new(&all_sheets());
    with_client(&fixture, |client| {
        let detail = client.fetch_layout("CB_DM202").expect("layout detail");
        assert_eq!(detail.name(), "CB_DM202");
        assert_eq!(detail.specifications.len(), 14);
        // No Width/Height columns, so the portrait default applies.
        assert_eq!(detail.preview.height, 500.0);

        match client.fetch_layout("nope") {
            Err(DashboardError::Remote(message)) => {
                assert_eq!(message, "Layout \"nope\" not found")
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    })
    .await;
}

#[test]
fn unreachable_server_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = DashboardClient::new(&format!("http://{addr}")).expect("client");
    assert!(matches!(
        client.fetch_rows(Dataset::Categories),
        Err(DashboardError::Http(_))
    ));
}
