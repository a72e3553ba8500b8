mod common;

use anyhow::Result;
use common::{context, product_request, services};
use shared::{
    domain::requests::{CreateCategoryRequest, CreateMaterialRequest, ProductRequest},
    errors::{RepositoryError, ServiceError},
    repository::MemoryStore,
};

#[tokio::test]
async fn create_then_get_returns_skus() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;
    let ctx = context(1);

    let created = deps
        .product_service
        .command
        .create_product(&ctx, &product_request())
        .await?;
    let product_id = created.data.product_id;
    assert!(product_id > 0);

    let fetched = deps
        .product_service
        .query
        .get_product_by_id(product_id)
        .await?
        .data;

    assert_eq!(fetched.product_name, "Менажница");
    assert_eq!(fetched.category_id, 105);
    assert_eq!(fetched.user_id, 1);
    assert_eq!(fetched.weight, 500.0);
    assert_eq!(fetched.description, "описание");
    assert_eq!(fetched.ozon_sku, 1242124);
    assert_eq!(fetched.wildberries_sku, 24345325);
    assert_eq!(store.market_place_item_count().await, 2);

    Ok(())
}

#[tokio::test]
async fn zero_skus_are_not_persisted() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;

    let req = ProductRequest {
        ozon_sku: 0,
        ..product_request()
    };
    let created = deps
        .product_service
        .command
        .create_product(&context(1), &req)
        .await?;

    let fetched = deps
        .product_service
        .query
        .get_product_by_id(created.data.product_id)
        .await?
        .data;

    assert_eq!(fetched.ozon_sku, 0);
    assert_eq!(fetched.wildberries_sku, 24345325);
    assert_eq!(store.market_place_item_count().await, 1);

    Ok(())
}

#[tokio::test]
async fn invalid_product_is_rejected_before_store() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;

    let req = ProductRequest {
        product_name: String::new(),
        category_id: 0,
        ..product_request()
    };
    let err = deps
        .product_service
        .command
        .create_product(&context(1), &req)
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation(errors) => {
            let fields = errors.field_errors();
            assert!(fields.contains_key("product_name"));
            assert!(fields.contains_key("category_id"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(store.product_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn update_adds_and_drops_marketplaces() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;
    let ctx = context(1);

    let req = ProductRequest {
        wildberries_sku: 0,
        ..product_request()
    };
    let product_id = deps
        .product_service
        .command
        .create_product(&ctx, &req)
        .await?
        .data
        .product_id;

    let update = ProductRequest {
        product_name: "Менажница большая".into(),
        ozon_sku: 0,
        wildberries_sku: 555,
        ..product_request()
    };
    deps.product_service
        .command
        .update_product(&ctx, product_id, &update)
        .await?;

    let fetched = deps
        .product_service
        .query
        .get_product_by_id(product_id)
        .await?
        .data;

    assert_eq!(fetched.product_name, "Менажница большая");
    assert_eq!(fetched.ozon_sku, 0);
    assert_eq!(fetched.wildberries_sku, 555);
    assert_eq!(store.market_place_item_count().await, 1);

    Ok(())
}

#[tokio::test]
async fn update_of_foreign_product_is_not_found() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;

    let product_id = deps
        .product_service
        .command
        .create_product(&context(1), &product_request())
        .await?
        .data
        .product_id;

    let err = deps
        .product_service
        .command
        .update_product(&context(2), product_id, &product_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));

    Ok(())
}

#[tokio::test]
async fn delete_removes_product_and_items() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;
    let ctx = context(1);

    let product_id = deps
        .product_service
        .command
        .create_product(&ctx, &product_request())
        .await?
        .data
        .product_id;

    deps.product_service
        .command
        .delete_product(&ctx, product_id)
        .await?;

    let err = deps
        .product_service
        .query
        .get_product_by_id(product_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));
    assert_eq!(store.market_place_item_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn delete_is_scoped_to_owner() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;

    let product_id = deps
        .product_service
        .command
        .create_product(&context(1), &product_request())
        .await?
        .data
        .product_id;

    let err = deps
        .product_service
        .command
        .delete_product(&context(2), product_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));

    let still_there = deps
        .product_service
        .query
        .get_product_by_id(product_id)
        .await?;
    assert_eq!(still_there.data.ozon_sku, 1242124);
    assert_eq!(store.market_place_item_count().await, 2);

    Ok(())
}

#[tokio::test]
async fn list_returns_only_own_products() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;

    for _ in 0..2 {
        deps.product_service
            .command
            .create_product(&context(1), &product_request())
            .await?;
    }
    deps.product_service
        .command
        .create_product(
            &context(2),
            &ProductRequest {
                ozon_sku: 42,
                ..product_request()
            },
        )
        .await?;

    let own = deps
        .product_service
        .query
        .get_products_by_user_id(1)
        .await?
        .data;
    assert_eq!(own.len(), 2);
    assert!(own.iter().all(|p| p.user_id == 1 && p.ozon_sku == 1242124));

    let other = deps
        .product_service
        .query
        .get_products_by_user_id(2)
        .await?
        .data;
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].ozon_sku, 42);

    assert!(
        deps.product_service
            .query
            .get_products_by_user_id(3)
            .await?
            .data
            .is_empty()
    );

    Ok(())
}

#[tokio::test]
async fn categories_and_materials() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;
    let command = &deps.product_service.command;

    let child = command
        .create_category(&CreateCategoryRequest {
            category_name: "Менажница Деревянная".into(),
            parent_category_id: 104,
        })
        .await?
        .data;
    let root = command
        .create_category(&CreateCategoryRequest {
            category_name: "Посуда".into(),
            parent_category_id: 0,
        })
        .await?
        .data;

    let categories = deps.product_service.query.get_product_categories().await?.data;
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].category_id, child.category_id);
    assert_eq!(categories[0].parent_category_id, 104);
    assert_eq!(categories[1].category_id, root.category_id);
    assert_eq!(categories[1].parent_category_id, 0);

    command
        .create_material(&CreateMaterialRequest {
            material_name: "Пластик".into(),
        })
        .await?;
    command
        .create_material(&CreateMaterialRequest {
            material_name: "Дерево".into(),
        })
        .await?;

    let materials = deps.product_service.query.get_product_materials().await?.data;
    let names: Vec<&str> = materials.iter().map(|m| m.material_name.as_str()).collect();
    assert_eq!(names, vec!["Дерево", "Пластик"]);

    let err = command
        .create_category(&CreateCategoryRequest {
            category_name: "ab".into(),
            parent_category_id: 0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    Ok(())
}

#[tokio::test]
async fn update_does_not_revive_inactive_product() -> Result<()> {
    let store = MemoryStore::new();
    let deps = services(&store).await;
    let ctx = context(1);

    let product_id = deps
        .product_service
        .command
        .create_product(&ctx, &product_request())
        .await?
        .data
        .product_id;
    assert!(store.deactivate_product(product_id).await);

    let err = deps
        .product_service
        .command
        .update_product(&ctx, product_id, &product_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));

    let err = deps
        .product_service
        .query
        .get_product_by_id(product_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));

    Ok(())
}
