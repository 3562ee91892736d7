//! Product catalogue tests

mod mock_store;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use mock_store::{app_state, InMemoryProductStore, InMemorySaleStore};
use shared::NewProduct;
use store_manager::services::ProductsService;

fn service(products: &Arc<InMemoryProductStore>) -> ProductsService {
    ProductsService::new(products.clone())
}

fn new_product(name: &str, quantity: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        quantity,
    }
}

#[tokio::test]
async fn test_get_all_products() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10), (2, "Traje de encolhimento", 20)]);

    let reply = service(&products).get_all().await.unwrap();

    assert_eq!(reply.code(), 200);
    let list = reply.into_data().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].name, "Martelo de Thor");
}

#[tokio::test]
async fn test_get_all_products_empty_is_not_found() {
    let products = InMemoryProductStore::with_products(&[]);

    let err = service(&products).get_all().await.unwrap_err();

    assert_eq!(err.code(), 404);
    assert_eq!(err.message(), "Products not found");
}

#[tokio::test]
async fn test_get_product_by_id() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10)]);
    let service = service(&products);

    let product = service.get_by_id(1).await.unwrap().into_data().unwrap();
    assert_eq!(product.quantity, 10);

    let err = service.get_by_id(2).await.unwrap_err();
    assert_eq!(err.code(), 404);
    assert_eq!(err.message(), "Product not found");
}

#[tokio::test]
async fn test_search_products() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10), (2, "Traje de encolhimento", 20)]);
    let service = service(&products);

    let found = service.search("Martelo").await.unwrap().into_data().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 1);

    let everything = service.search("").await.unwrap().into_data().unwrap();
    assert_eq!(everything.len(), 2);

    let nothing = service.search("Manopla").await.unwrap();
    assert_eq!(nothing.code(), 200);
    assert!(nothing.into_data().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_product() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10)]);

    let reply = service(&products).create(new_product("Manopla do Infinito", 3)).await.unwrap();

    assert_eq!(reply.code(), 201);
    let created = reply.into_data().unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(products.quantity(2).await, Some(3));
}

#[tokio::test]
async fn test_create_duplicate_product_conflicts() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10)]);

    let err = service(&products).create(new_product("Martelo de Thor", 3)).await.unwrap_err();

    assert_eq!(err.code(), 409);
    assert_eq!(err.message(), "Product already exists");
}

#[tokio::test]
async fn test_update_product() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10)]);
    let service = service(&products);

    let updated = service
        .update(1, new_product("Martelo do Batman", 30))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "Martelo do Batman");
    assert_eq!(products.quantity(1).await, Some(30));

    let err = service.update(9, new_product("Martelo do Batman", 30)).await.unwrap_err();
    assert_eq!(err.code(), 404);
}

#[tokio::test]
async fn test_delete_product() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10)]);
    let service = service(&products);

    assert_eq!(service.delete(1).await.unwrap().code(), 204);
    assert_eq!(products.quantity(1).await, None);

    let err = service.delete(1).await.unwrap_err();
    assert_eq!(err.code(), 404);
}

#[tokio::test]
async fn test_stock_overwrites_wait_for_running_sale() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10), (2, "Traje de encolhimento", 5)]);
    let sales = InMemorySaleStore::new();
    let state = app_state(&products, &sales);

    let guard = state.sales.inventory_guard();
    let held = guard.lock().await;

    let update = state.products.update(1, new_product("Martelo de Thor", 1));
    assert!(tokio::time::timeout(Duration::from_millis(50), update).await.is_err());
    let delete = state.products.delete(2);
    assert!(tokio::time::timeout(Duration::from_millis(50), delete).await.is_err());
    assert_eq!(products.quantity(1).await, Some(10));
    assert_eq!(products.quantity(2).await, Some(5));

    drop(held);

    state.products.update(1, new_product("Martelo de Thor", 1)).await.unwrap();
    state.products.delete(2).await.unwrap();
    assert_eq!(products.quantity(1).await, Some(1));
    assert_eq!(products.quantity(2).await, None);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let products = InMemoryProductStore::with_products(&[(1, "Martelo de Thor", 10)]);
    products.fail.store(true, Ordering::SeqCst);

    let err = service(&products).get_all().await.unwrap_err();

    assert_eq!(err.code(), 500);
    assert_eq!(err.message(), "Internal server error");
}
