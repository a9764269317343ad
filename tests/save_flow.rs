//! Saving a search result enforces the cookable invariant at the store
//! boundary, the same check the normalizer applies inside the pipeline.

use recipe_scout::model::RawDetail;
use recipe_scout::normalize::to_recipe_detail;
use recipe_scout::{MemoryStore, RecipeStore, StoreError};

fn searched_recipe() -> recipe_scout::RecipeDetail {
    let raw: RawDetail = serde_json::from_str(
        r#"{
            "id": 111,
            "title": "Weeknight Pasta",
            "image": "https://img.example/111.jpg",
            "extendedIngredients": [
                {"name": "pasta", "amount": 200, "unit": "g", "original": "200 g pasta"}
            ],
            "instructions": "Boil water. Cook pasta."
        }"#,
    )
    .unwrap();
    to_recipe_detail(raw).unwrap()
}

#[tokio::test]
async fn test_search_result_is_saveable() {
    let store = MemoryStore::default();
    let id = store.save("alice", searched_recipe()).await.unwrap();

    let saved = store.list("alice").await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].title, "Weeknight Pasta");

    store.remove("alice", id).await.unwrap();
    assert!(store.list("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tampered_payload_rejected() {
    // A client could POST arbitrary JSON at the save route; stripping the
    // instructions must be caught at the boundary.
    let mut recipe = searched_recipe();
    recipe.instructions = String::new();

    let store = MemoryStore::default();
    let err = store.save("alice", recipe).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecipe(_)));
}
