mod common;

use center_search::app::{CenterViewService, DuplicatePolicy, LocationRequest, LocationService, SearchService};
use center_search::domain::LocationStatus;
use center_search::error::CenterError;
use center_search::storage::InMemoryLocationRepository;
use common::{TableGeocoder, METERS_PER_DEGREE_LAT};
use std::sync::Arc;

const BASE_LON: f64 = 127.1378;
const BASE_LAT: f64 = 37.4200;

fn request(name: &str, address: &str) -> LocationRequest {
    LocationRequest {
        location_name: name.to_string(),
        location_number: "031-729-1234".to_string(),
        location_address: address.to_string(),
    }
}

fn setup(geocoder: TableGeocoder) -> (Arc<TableGeocoder>, LocationService) {
    let geocoder = Arc::new(geocoder);
    let service = LocationService::new(Arc::new(InMemoryLocationRepository::new()), geocoder.clone());
    (geocoder, service)
}

#[tokio::test]
async fn same_address_is_duplicate_without_geocoding() {
    let (geocoder, service) = setup(TableGeocoder::new().with("성남시 분당구 성남대로 1", BASE_LON, BASE_LAT));
    service
        .create(&request("정자경로당", "성남시 분당구 성남대로 1"))
        .await
        .unwrap();
    let calls_after_create = geocoder.calls();

    let err = service
        .create(&request("다른이름", "  성남시 분당구 성남대로 1  "))
        .await
        .unwrap_err();

    assert!(matches!(err, CenterError::Duplicate { .. }));
    assert!(err.is_argument_error());
    assert_eq!(geocoder.calls(), calls_after_create);
}

#[tokio::test]
async fn same_address_is_duplicate_even_when_geocoding_is_down() {
    let geocoder = Arc::new(TableGeocoder::new().with("성남시 중원구 광명로 5", BASE_LON, BASE_LAT));
    let repo = Arc::new(InMemoryLocationRepository::new());
    LocationService::new(repo.clone(), geocoder)
        .create(&request("금광경로당", "성남시 중원구 광명로 5"))
        .await
        .unwrap();

    let strict = LocationService::with_policy(
        repo,
        Arc::new(TableGeocoder::new()),
        DuplicatePolicy {
            fail_open_on_geocode_error: false,
            ..DuplicatePolicy::default()
        },
    );
    assert!(strict.is_duplicate("성남시 중원구 광명로 5").await.unwrap());
}

#[tokio::test]
async fn radius_boundary_decides_duplicates() {
    let near_lat = BASE_LAT + 9.9 / METERS_PER_DEGREE_LAT;
    let far_lat = BASE_LAT + 10.1 / METERS_PER_DEGREE_LAT;
    let (_, service) = setup(
        TableGeocoder::new()
            .with("성남시 수정구 원본 1", BASE_LON, BASE_LAT)
            .with("성남시 수정구 가까운 2", BASE_LON, near_lat)
            .with("성남시 수정구 먼 3", BASE_LON, far_lat),
    );
    service
        .create(&request("원본경로당", "성남시 수정구 원본 1"))
        .await
        .unwrap();

    assert!(service.is_duplicate("성남시 수정구 가까운 2").await.unwrap());
    assert!(!service.is_duplicate("성남시 수정구 먼 3").await.unwrap());

    let err = service
        .create(&request("가까운경로당", "성남시 수정구 가까운 2"))
        .await
        .unwrap_err();
    assert!(matches!(err, CenterError::Duplicate { .. }));
    service
        .create(&request("먼경로당", "성남시 수정구 먼 3"))
        .await
        .unwrap();
}

#[tokio::test]
async fn geocoding_failure_during_check_fails_open() {
    let (_, service) = setup(TableGeocoder::new());
    assert!(!service.is_duplicate("성남시 어딘가").await.unwrap());

    let err = service
        .create(&request("없는경로당", "성남시 어딘가"))
        .await
        .unwrap_err();
    assert!(matches!(err, CenterError::Geocoding { .. }));
    assert!(!err.is_argument_error());
    assert!(service.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn deactivation_removes_from_every_active_view() {
    let geocoder = Arc::new(TableGeocoder::new().with("성남시 분당구 야탑로 7", BASE_LON, BASE_LAT));
    let repo = Arc::new(InMemoryLocationRepository::new());
    let service = LocationService::new(repo.clone(), geocoder);
    let search = SearchService::new(repo.clone());
    let views = CenterViewService::new(service.clone());

    let created = service
        .create(&request("야탑경로당", "성남시 분당구 야탑로 7"))
        .await
        .unwrap();
    assert_eq!(views.markers().await.unwrap().len(), 1);

    service
        .change_status(created.id, LocationStatus::Inactive)
        .await
        .unwrap();

    assert!(service.find_all_active().await.unwrap().is_empty());
    assert!(service.find_active_by_ids(&[created.id]).await.unwrap().is_empty());
    assert!(search.search("야탑").await.unwrap().is_empty());
    assert!(views.markers().await.unwrap().is_empty());
    assert!(views.main_groups().await.unwrap().iter().all(|g| g.locations.is_empty()));
    assert!(views.quarter("분당구").await.unwrap().is_empty());
    assert!(matches!(
        views.detail(created.id).await,
        Err(CenterError::NotFound { .. })
    ));
    assert!(views.update_form(created.id).await.unwrap().is_none());

    // Still stored, just hidden.
    let stored = service.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.status, LocationStatus::Inactive);

    // The address is free again.
    service
        .create(&request("새야탑경로당", "성남시 분당구 야탑로 7"))
        .await
        .unwrap();
}

#[tokio::test]
async fn change_status_applies_requested_status() {
    let (_, service) = setup(TableGeocoder::new().with("성남시 수정구 복정로 2", BASE_LON, BASE_LAT));
    let created = service
        .create(&request("복정경로당", "성남시 수정구 복정로 2"))
        .await
        .unwrap();

    service
        .change_status(created.id, LocationStatus::Inactive)
        .await
        .unwrap();
    service
        .change_status(created.id, LocationStatus::Active)
        .await
        .unwrap();

    let stored = service.find_by_id(created.id).await.unwrap().unwrap();
    assert!(stored.is_active());
}

#[tokio::test]
async fn update_regeocodes_and_skips_duplicate_check() {
    let (_, service) = setup(
        TableGeocoder::new()
            .with("성남시 중원구 둔촌대로 1", BASE_LON, BASE_LAT)
            .with("성남시 중원구 둔촌대로 2", BASE_LON + 0.01, BASE_LAT + 0.01),
    );
    let first = service
        .create(&request("하대원경로당", "성남시 중원구 둔촌대로 1"))
        .await
        .unwrap();
    let second = service
        .create(&request("도촌경로당", "성남시 중원구 둔촌대로 2"))
        .await
        .unwrap();

    // Moving onto another active location's address is allowed on update.
    let updated = service
        .update(second.id, &request("도촌경로당", "성남시 중원구 둔촌대로 1"))
        .await
        .unwrap();

    assert_eq!(updated.id, second.id);
    assert_eq!(updated.latitude, first.latitude);
    assert_eq!(updated.created_at, second.created_at);

    let missing = service
        .update(999, &request("없음", "성남시 중원구 둔촌대로 1"))
        .await
        .unwrap_err();
    assert!(matches!(missing, CenterError::NotFound { id: 999 }));
}
