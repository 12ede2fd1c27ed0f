use common::RetailerId;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use domain::{
    Address, AddressProps, Money, NewOrder, NewOrderItem, Order, OrderItem, OrderRecord,
    OrderResponse, ProductId,
};

fn new_order() -> Order {
    let address = Address::new(AddressProps {
        street: "1 Main St".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        postal_code: "62701".into(),
        country: "US".into(),
    })
    .unwrap();

    Order::create(NewOrder {
        retailer_id: RetailerId::new(),
        customer_id: "CUST-BENCH".into(),
        customer_name: "Bench Customer".into(),
        customer_email: "bench@example.com".into(),
        delivery_address: address,
        notes: None,
    })
    .unwrap()
}

fn item(index: usize) -> OrderItem {
    OrderItem::new(NewOrderItem {
        product_id: ProductId::new(format!("SKU-{index:04}")),
        product_name: format!("Widget {index}"),
        quantity: 2,
        unit_price: Money::from_cents(1999, "USD").unwrap(),
    })
    .unwrap()
}

fn order_with_items(count: usize) -> Order {
    let mut order = new_order();
    for index in 0..count {
        order.add_item(item(index)).unwrap();
    }
    order
}

fn bench_create_order(c: &mut Criterion) {
    c.bench_function("domain/create_order", |b| b.iter(new_order));
}

fn bench_add_item(c: &mut Criterion) {
    c.bench_function("domain/add_item_50", |b| {
        b.iter_batched(
            new_order,
            |mut order| {
                for index in 0..50 {
                    order.add_item(item(index)).unwrap();
                }
                order
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("domain/merge_existing_item", |b| {
        b.iter_batched(
            || order_with_items(50),
            |mut order| {
                order.add_item(item(25)).unwrap();
                order
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_total_amount(c: &mut Criterion) {
    let order = order_with_items(100);
    c.bench_function("domain/total_amount_100_items", |b| {
        b.iter(|| order.total_amount().unwrap())
    });
}

fn bench_lifecycle(c: &mut Criterion) {
    c.bench_function("domain/confirm_dispatch_deliver", |b| {
        b.iter_batched(
            || order_with_items(5),
            |mut order| {
                order.transition_to("CONFIRMED").unwrap();
                order.transition_to("DISPATCHED").unwrap();
                order.transition_to("DELIVERED").unwrap();
                order
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_projection(c: &mut Criterion) {
    let order = order_with_items(20);
    c.bench_function("domain/project_response", |b| {
        b.iter(|| OrderResponse::try_from(&order).unwrap())
    });

    let response = OrderResponse::try_from(&order).unwrap();
    c.bench_function("domain/rehydrate_record", |b| {
        b.iter_batched(
            || response.clone(),
            |response| Order::reconstitute(OrderRecord::try_from(response).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_create_order,
    bench_add_item,
    bench_total_amount,
    bench_lifecycle,
    bench_projection,
);
criterion_main!(benches);
