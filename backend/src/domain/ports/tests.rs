use super::*;
use crate::domain::{BoundingBox, Cat, CatId, CatName, GeoPoint, UserId, Weight};
use actix_rt::System;
use chrono::NaiveDate;
use rstest::{fixture, rstest};

fn point(lng: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lng, lat).expect("valid point")
}

#[fixture]
fn cat() -> Cat {
    Cat {
        id: CatId::random(),
        name: CatName::new("Pippuri").expect("name"),
        weight: Weight::new(3.5).expect("weight"),
        birthdate: NaiveDate::from_ymd_opt(2019, 1, 2).expect("date"),
        owner: UserId::random(),
        location: point(5.0, 5.0),
    }
}

#[rstest]
fn filter_all_matches_everything(cat: Cat) {
    assert!(CatFilter::All.matches(&cat));
}

#[rstest]
fn filter_owned_by_compares_owner(cat: Cat) {
    assert!(CatFilter::OwnedBy(cat.owner).matches(&cat));
    assert!(!CatFilter::OwnedBy(UserId::random()).matches(&cat));
}

#[rstest]
#[case(BoundingBox::new(point(0.0, 0.0), point(10.0, 10.0)), true)]
#[case(BoundingBox::new(point(5.0, 5.0), point(5.0, 5.0)), true)]
#[case(BoundingBox::new(point(6.0, 0.0), point(10.0, 10.0)), false)]
fn filter_within_box_uses_location(cat: Cat, #[case] area: BoundingBox, #[case] expected: bool) {
    assert_eq!(CatFilter::WithinBox(area).matches(&cat), expected);
}

#[rstest]
fn persistence_error_constructors_format_messages() {
    assert_eq!(
        CatPersistenceError::connection("refused").to_string(),
        "cat repository connection failed: refused"
    );
    assert_eq!(
        UserPersistenceError::duplicate_email("a@x.com"),
        UserPersistenceError::DuplicateEmail {
            email: "a@x.com".to_owned()
        }
    );
    assert_eq!(
        PasswordHashError::malformed_hash("bad prefix").to_string(),
        "stored password hash is malformed: bad prefix"
    );
}

#[rstest]
fn mocked_repository_serves_trait_objects(cat: Cat) {
    let mut repo = MockCatRepository::new();
    let expected = cat.clone();
    repo.expect_find_by_id()
        .withf(move |id| *id == expected.id)
        .times(1)
        .return_const(Ok(Some(cat.clone())));
    let repo: Box<dyn CatRepository> = Box::new(repo);

    System::new().block_on(async move {
        let loaded = repo.find_by_id(&cat.id).await.expect("lookup");
        assert_eq!(loaded, Some(cat));
    });
}
