use restaurant_core::{Address, Location, Restaurant};

#[test]
fn full_restaurant_roundtrips() {
    let restaurant = Restaurant {
        id: Some("Rest1".to_string()),
        name: "Rest 1".to_string(),
        address: Some(Address {
            line1: Some("123 street".to_string()),
            line2: Some("suite 4".to_string()),
            city: Some("city".to_string()),
            state: Some("state".to_string()),
            zip_code: Some("zip".to_string()),
            country: Some("country".to_string()),
            location: Some(Location {
                geocode: Some("123.000000,456.000000".to_string()),
                address_number: Some("123".to_string()),
                street: Some("street".to_string()),
                municipality: Some("city".to_string()),
                postal_code: Some("zip".to_string()),
                region: Some("state".to_string()),
                sub_region: Some("substate".to_string()),
                country: Some("country".to_string()),
            }),
            timezone_name: Some("America/Chicago".to_string()),
        }),
    };

    let json = serde_json::to_string(&restaurant).unwrap();
    let decoded: Restaurant = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, restaurant);
    assert!(json.contains(r#""zipCode":"zip""#));
    assert!(json.contains(r#""subRegion":"substate""#));
    assert!(json.contains(r#""timezoneName":"America/Chicago""#));
}

#[test]
fn absent_fields_are_omitted_and_stay_absent() {
    let restaurant = Restaurant {
        id: None,
        name: "Rest 1".to_string(),
        address: Some(Address {
            city: Some("city".to_string()),
            ..Address::default()
        }),
    };

    let json = serde_json::to_string(&restaurant).unwrap();
    assert_eq!(json, r#"{"name":"Rest 1","address":{"city":"city"}}"#);

    let decoded: Restaurant = serde_json::from_str(&json).unwrap();
    let address = decoded.address.unwrap();
    assert_eq!(decoded.id, None);
    assert_eq!(address.location, None);
    assert_eq!(address.timezone_name, None);
}

#[test]
fn resolved_empty_values_differ_from_absent() {
    let resolved = Address {
        location: Some(Location::default()),
        timezone_name: Some(String::new()),
        ..Address::default()
    };

    let json = serde_json::to_string(&resolved).unwrap();
    assert_eq!(json, r#"{"location":{},"timezoneName":""}"#);

    let decoded: Address = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, resolved);
    assert_ne!(decoded, Address::default());
}

#[test]
fn null_fields_decode_as_absent() {
    let decoded: Restaurant =
        serde_json::from_str(r#"{"id":null,"name":"Rest 1","address":null}"#).unwrap();

    assert_eq!(decoded, Restaurant::new("Rest 1"));
}
