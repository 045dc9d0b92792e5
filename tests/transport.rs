use std::net::TcpListener;
use std::time::{Duration, Instant};

use catalog_browse::controller::transport::HttpBrowseTransport;
use catalog_browse::controller::{BrowseController, ERROR_LOADING_PRODUCTS, FetchError, Region};
use catalog_browse::dto::browse::{
    ALL_TAB_ID, BROWSE_ENDPOINT, BrowseBootstrap, CategoryTab, LOAD_PRODUCTS_ACTION,
};

fn bootstrap() -> BrowseBootstrap {
    BrowseBootstrap {
        endpoint: BROWSE_ENDPOINT.to_string(),
        action: LOAD_PRODUCTS_ACTION.to_string(),
        token: "tok".to_string(),
        page_size: 12,
        search_enabled: true,
        tabs: vec![CategoryTab {
            id: ALL_TAB_ID.to_string(),
            name: "All Products".to_string(),
        }],
    }
}

#[actix_web::test]
async fn stalled_server_times_out_into_error_region() {
    // Accepts connections through the backlog but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let transport =
        HttpBrowseTransport::with_timeout(base_url, Duration::from_millis(200)).unwrap();
    let mut controller = BrowseController::new(bootstrap());
    let request = controller.refresh();
    assert_eq!(controller.region(), &Region::Loading);

    let started = Instant::now();
    let outcome = transport.load(&request).await;
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(matches!(outcome, Err(FetchError::NetworkFailure(_))));

    assert!(controller.on_fetch_complete(request.seq, outcome));
    assert_eq!(controller.region(), &Region::Error(ERROR_LOADING_PRODUCTS));

    drop(listener);
}
