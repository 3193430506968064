use token_shop::domain::ports::{ProductStoreBox, ProductStoreFactory};
use token_shop::domain::product::Product;
use token_shop::infrastructure::in_memory::InMemoryProductStore;

#[tokio::test]
async fn test_factory_instantiation() {
    let factory: ProductStoreFactory =
        Box::new(|| Box::new(InMemoryProductStore::new()) as ProductStoreBox);

    let store = factory();
    store.store(Product::new(1, "oreo", 10)).await.unwrap();
    let retrieved = store.get(1).await.unwrap().unwrap();
    assert_eq!(retrieved.name, "oreo");

    // Each call yields an independent store.
    let fresh = factory();
    assert!(fresh.get(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_factory_in_task() {
    let factory: ProductStoreFactory =
        Box::new(|| Box::new(InMemoryProductStore::new()) as ProductStoreBox);

    let handle = tokio::spawn(async move {
        let store = factory();
        store.store(Product::new(2, "milk", 1)).await.unwrap();
        store.get(2).await.unwrap().unwrap()
    });

    let retrieved = handle.await.unwrap();
    assert_eq!(retrieved.id, 2);
}
