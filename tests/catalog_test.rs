mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{Part, TestApp, json_request};
use serde_json::{Value, json};

#[tokio::test]
async fn test_category_lifecycle() {
    let app = TestApp::new().await;
    let token = app.login().await;

    // Without image
    let response = app
        .post_form(
            "/api/categories",
            &token,
            &[
                Part::Text("name", "Luxury"),
                Part::Text("description", "Top end cars"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let json = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["statusCode"], 201);
    assert_eq!(json["data"]["name"], "Luxury");
    assert_eq!(json["data"]["imagePath"], "");
    let luxury_id = json["data"]["id"].as_i64().unwrap();

    // With image, field names matched case-insensitively
    let response = app
        .post_form(
            "/api/categories",
            &token,
            &[
                Part::Text("Name", "Yachts"),
                Part::Text("Description", "On the water"),
                Part::File("Image", "boat.png", b"png-data"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let image_path = response.json()["data"]["imagePath"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(image_path.starts_with("uploads/categories/"));
    assert!(image_path.ends_with(".png"));
    assert_eq!(std::fs::read(app.media_path(&image_path)).unwrap(), b"png-data");

    // Stored media is served statically
    let response = app
        .send(
            Request::builder()
                .uri(format!("/{}", image_path))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], b"png-data");

    let response = app.get("/api/categories", &token).await;
    let list = response.json()["data"].as_array().unwrap().clone();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|c| c.get("vehicles").is_none()));

    let response = app
        .get(&format!("/api/categories/{}", luxury_id), &token)
        .await;
    assert_eq!(response.json()["data"]["description"], "Top end cars");

    let response = app
        .send(json_request(
            "PUT",
            &format!("/api/categories/{}", luxury_id),
            Some(&token),
            json!({"name": "Premium", "description": "Renamed"}),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["message"], "Category updated");
    assert_eq!(json["data"]["name"], "Premium");
    assert_eq!(json["data"]["description"], "Renamed");
}

#[tokio::test]
async fn test_category_not_found_and_validation() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let response = app.get("/api/categories/999", &token).await;
    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["statusCode"], 404);
    assert_eq!(json["message"], "Category not found");

    let response = app
        .send(json_request(
            "PUT",
            "/api/categories/999",
            Some(&token),
            json!({"name": "Ghost", "description": ""}),
        ))
        .await;
    assert_eq!(response.json()["statusCode"], 404);

    let response = app.delete("/api/categories/999", &token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Category not found");

    let response = app
        .post_form("/api/categories", &token, &[Part::Text("name", "   ")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let json = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["statusCode"], 400);
}

#[tokio::test]
async fn test_vehicle_create_with_images_and_discount() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let category_id = app.create_category(&token, "Sports").await.to_string();

    let response = app
        .post_form(
            "/api/vehicles",
            &token,
            &[
                Part::Text("name", "Ferrari F8"),
                Part::Text("type", "Car"),
                Part::Text("categoryId", &category_id),
                Part::Text("pricePerDay", "100"),
                Part::Text("speed", "340 km/h"),
                Part::Text("description", "Mid-engine V8"),
                Part::Text("isOffer", "true"),
                Part::Text("offerPercentage", "20"),
                Part::Text("isTopSelling", "false"),
                Part::File("image1", "front.jpg", b"one"),
                Part::File("image2", "side.webp", b"two"),
                Part::File("image3", "rear.png", b"three"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
    let json = response.json();
    let vehicle = &json["data"];
    assert_eq!(json["statusCode"], 201);
    assert_eq!(vehicle["type"], "Car");
    assert_eq!(vehicle["discountedPrice"].as_f64(), Some(80.0));
    assert_eq!(vehicle["availableForRent"], true);
    assert_eq!(vehicle["category"]["name"], "Sports");

    let paths: Vec<String> =
        serde_json::from_str(vehicle["imagePaths"].as_str().unwrap()).unwrap();
    assert_eq!(paths.len(), 3);
    for (path, (ext, content)) in paths.iter().zip([
        (".jpg", &b"one"[..]),
        (".webp", &b"two"[..]),
        (".png", &b"three"[..]),
    ]) {
        assert!(path.starts_with("uploads/vehicles/Ferrari_F8/"), "{}", path);
        assert!(path.ends_with(ext));
        assert_eq!(std::fs::read(app.media_path(path)).unwrap(), content);
    }

    let offers = app.get("/api/vehicles/offers", &token).await.json();
    let offers = offers["data"].as_array().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0]["category"]["name"], "Sports");

    let top = app.get("/api/vehicles/top-selling", &token).await.json();
    assert!(top["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_vehicle_patch_is_partial() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let category_id = app.create_category(&token, "SUV").await.to_string();

    let response = app
        .post_form(
            "/api/vehicles",
            &token,
            &[
                Part::Text("name", "Lambo Urus"),
                Part::Text("categoryId", &category_id),
                Part::Text("pricePerDay", "150.50"),
                Part::Text("description", "Super SUV"),
                Part::Text("offerPercentage", "10"),
                Part::Text("availableForRent", "false"),
            ],
        )
        .await;
    let before: Value = response.json()["data"].clone();
    let id = before["id"].as_i64().unwrap();
    assert_eq!(before["isOffer"], false);
    assert_eq!(before["discountedPrice"].as_f64(), Some(150.5));

    let response = app
        .send(json_request(
            "PATCH",
            &format!("/api/vehicles/{}", id),
            Some(&token),
            json!({"isOffer": true}),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["message"], "Vehicle updated");
    let after = &json["data"];
    assert_eq!(after["isOffer"], true);
    for field in [
        "name",
        "type",
        "categoryId",
        "pricePerDay",
        "offerPercentage",
        "speed",
        "description",
        "isTopSelling",
        "availableForRent",
        "imagePaths",
    ] {
        assert_eq!(after[field], before[field], "{} changed", field);
    }
    assert_eq!(after["discountedPrice"].as_f64(), Some(135.45));

    // Empty patch is a no-op
    let response = app
        .send(json_request(
            "PATCH",
            &format!("/api/vehicles/{}", id),
            Some(&token),
            json!({}),
        ))
        .await;
    assert_eq!(response.json()["data"]["pricePerDay"], after["pricePerDay"]);

    let response = app
        .send(json_request(
            "PATCH",
            "/api/vehicles/4242",
            Some(&token),
            json!({"pricePerDay": 10}),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Vehicle not found");
}

#[tokio::test]
async fn test_vehicle_delete_removes_media() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let category_id = app.create_category(&token, "Bikes").await.to_string();

    let response = app
        .post_form(
            "/api/vehicles",
            &token,
            &[
                Part::Text("name", "Ducati Panigale"),
                Part::Text("type", "Bike"),
                Part::Text("categoryId", &category_id),
                Part::Text("pricePerDay", "80"),
                Part::File("image1", "ducati.jpg", b"red"),
            ],
        )
        .await;
    let json = response.json();
    let id = json["data"]["id"].as_i64().unwrap();
    let dir = app.media_path("uploads/vehicles/Ducati_Panigale");
    assert!(dir.is_dir());

    let response = app.delete(&format!("/api/vehicles/{}", id), &token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Vehicle deleted");
    assert!(!dir.exists());

    let response = app.get(&format!("/api/vehicles/{}", id), &token).await;
    assert_eq!(response.json()["statusCode"], 404);

    let response = app.delete(&format!("/api/vehicles/{}", id), &token).await;
    assert_eq!(response.json()["message"], "Vehicle not found");
}

#[tokio::test]
async fn test_category_delete_cascades_to_vehicles() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let response = app
        .post_form(
            "/api/categories",
            &token,
            &[
                Part::Text("name", "Vintage"),
                Part::File("image", "old.jpg", b"sepia"),
            ],
        )
        .await;
    let json = response.json();
    let category_id = json["data"]["id"].as_i64().unwrap();
    let image_path = json["data"]["imagePath"].as_str().unwrap().to_string();

    let keep_category = app.create_category(&token, "Modern").await;
    let first = app.create_vehicle(&token, "Model T", category_id).await;
    let second = app.create_vehicle(&token, "Beetle", category_id).await;
    let survivor = app.create_vehicle(&token, "Tesla", keep_category).await;

    let response = app
        .delete(&format!("/api/categories/{}", category_id), &token)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Category deleted");

    for id in [first, second] {
        let response = app.get(&format!("/api/vehicles/{}", id), &token).await;
        assert_eq!(response.json()["message"], "Vehicle not found");
    }
    let response = app
        .get(&format!("/api/vehicles/{}", survivor), &token)
        .await;
    assert_eq!(response.json()["success"], true);

    // Category images are left on disk
    assert!(app.media_path(&image_path).exists());
}

#[tokio::test]
async fn test_vehicle_create_failures() {
    let app = TestApp::new().await;
    let token = app.login().await;

    // Unknown category: persistence fault surfaced in the envelope
    let response = app
        .post_form(
            "/api/vehicles",
            &token,
            &[
                Part::Text("name", "Orphan"),
                Part::Text("categoryId", "999"),
                Part::Text("pricePerDay", "10"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["statusCode"], 500);
    assert!(!json["message"].as_str().unwrap().is_empty());
    assert!(json["data"].is_null());

    let response = app
        .post_form(
            "/api/vehicles",
            &token,
            &[
                Part::Text("name", "Bad Price"),
                Part::Text("pricePerDay", "cheap"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.json()["message"]
            .as_str()
            .unwrap()
            .contains("pricePerDay")
    );

    let all = app.get("/api/vehicles", &token).await.json();
    assert!(all["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unbounded_offer_percentage_stays_readable() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let category_id = app.create_category(&token, "Exotic").await;
    let patched = app.create_vehicle(&token, "Koenigsegg", category_id).await;

    let response = app
        .send(json_request(
            "PATCH",
            &format!("/api/vehicles/{}", patched),
            Some(&token),
            json!({"isOffer": true, "offerPercentage": 1e28, "pricePerDay": 1000}),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["discountedPrice"].as_f64(), Some(1000.0));

    // Same values through the multipart create path
    let category = category_id.to_string();
    let response = app
        .post_form(
            "/api/vehicles",
            &token,
            &[
                Part::Text("name", "Bugatti"),
                Part::Text("categoryId", &category),
                Part::Text("pricePerDay", "1000"),
                Part::Text("isOffer", "true"),
                Part::Text("offerPercentage", "1e28"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
    let created = response.json()["data"]["id"].as_i64().unwrap();

    for id in [patched, created] {
        let response = app.get(&format!("/api/vehicles/{}", id), &token).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["data"]["discountedPrice"].as_f64(), Some(1000.0));
    }

    for uri in ["/api/vehicles", "/api/vehicles/offers"] {
        let response = app.get(uri, &token).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["data"].as_array().unwrap().len(), 2);
    }
}
