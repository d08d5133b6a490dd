use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use storefront::{
  CategoryDraft, CredentialService, MemoryStore, ProductDraft, ReviewDraft, Role, Store, Storefront, User,
};
use tokio::runtime::Runtime; // To run async code within Criterion

const SECRET: &[u8] = b"bench-secret";

fn bench_user() -> User {
  User {
    id: 1,
    email: "bench@shop.io".to_string(),
    hashed_password: String::new(),
    role: Role::Buyer,
    is_active: true,
  }
}

// --- Token decode is on the path of every authenticated request ---

fn bench_token_decode(c: &mut Criterion) {
  let mut group = c.benchmark_group("TokenDecode");
  let credentials = CredentialService::with_default_ttls(SECRET);
  let token = credentials.issue_access_token(&bench_user()).unwrap();

  group.throughput(Throughput::Elements(1));
  group.bench_function("valid_access_token", |b| {
    b.iter(|| credentials.decode(&token).unwrap());
  });
  group.bench_function("foreign_signature", |b| {
    let foreign = CredentialService::with_default_ttls(b"someone-else")
      .issue_access_token(&bench_user())
      .unwrap();
    b.iter(|| credentials.decode(&foreign).is_err());
  });
  group.finish();
}

// --- Rating recompute cost as a product accumulates reviews ---

fn seeded_storefront(rt: &Runtime, reviews: usize) -> (Storefront, i64) {
  rt.block_on(async {
    let store = Arc::new(MemoryStore::new());
    let storefront = Storefront::new(store.clone(), CredentialService::with_default_ttls(SECRET));
    let category = store
      .insert_category(&CategoryDraft {
        name: "Bench".to_string(),
        parent_id: None,
      })
      .await
      .unwrap();
    let product = store
      .insert_product(
        &ProductDraft {
          name: "Benchmark widget".to_string(),
          description: None,
          price: 1.0,
          image_url: None,
          stock: 1,
          category_id: category.id,
        },
        1,
      )
      .await
      .unwrap();
    for i in 0..reviews {
      store
        .insert_review(
          1,
          &ReviewDraft {
            product_id: product.id,
            comment: None,
            grade: (i % 5) as i32 + 1,
          },
        )
        .await
        .unwrap();
    }
    (storefront, product.id)
  })
}

fn bench_rating_recompute(c: &mut Criterion) {
  let mut group = c.benchmark_group("RatingRecompute");
  let rt = Runtime::new().unwrap();

  for review_count in [0usize, 10, 1_000].iter() {
    let (storefront, product_id) = seeded_storefront(&rt, *review_count);
    group.bench_with_input(BenchmarkId::from_parameter(review_count), review_count, |b, _| {
      b.to_async(&rt).iter(|| {
        let rating = storefront.rating.clone();
        async move { rating.recompute(product_id).await.unwrap() }
      });
    });
  }
  group.finish();
}

criterion_group!(benches, bench_token_decode, bench_rating_recompute);
criterion_main!(benches);
