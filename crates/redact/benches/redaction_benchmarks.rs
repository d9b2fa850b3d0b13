use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};

/// Build an order-like document with `items` line items.
fn order_body(items: usize) -> Vec<u8> {
    let lines: Vec<Value> = (0..items)
        .map(|i| {
            json!({
                "sku": format!("SKU-{i:05}"),
                "quantity": i % 7 + 1,
                "unit_price": 19.99,
                "gift": i % 3 == 0,
                "notes": null,
            })
        })
        .collect();

    let doc = json!({
        "order_id": "ord-2f9c",
        "customer": { "name": "Jane Doe", "email": "jane@example.com", "vip": true },
        "lines": lines,
    });
    serde_json::to_vec(&doc).unwrap_or_default()
}

fn bench_redact(c: &mut Criterion) {
    let mut group = c.benchmark_group("redact");

    for items in [1usize, 32, 512] {
        let body = order_body(items);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &body, |b, body| {
            b.iter(|| tracelens_redact::redact(black_box(body)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_redact);
criterion_main!(benches);
