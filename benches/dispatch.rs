use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::Method;
use stackroute::{Flow, Handler, Layer, MatchOptions, Next, Request, Response, Route};
use std::sync::Arc;

fn passthrough() -> Handler {
    Handler::request(|req: Request, res: Response, next: Next| {
        next.run(req, res, Flow::Continue);
    })
}

fn build_route(layers: usize) -> Arc<Route> {
    let mut route = Route::new("/zoo/animals/{id}");
    for _ in 0..layers {
        route.get(passthrough());
    }
    Arc::new(route)
}

fn bench_dispatch(c: &mut Criterion) {
    let route = build_route(5);
    c.bench_function("dispatch_5_layers", |b| {
        b.iter(|| {
            let req = Request::new(Method::GET, "/zoo/animals/123");
            Arc::clone(&route).dispatch(black_box(req), Response::default(), |flow| {
                black_box(flow);
            });
        })
    });

    let deep = build_route(250);
    c.bench_function("dispatch_250_layers_deferred", |b| {
        b.iter(|| {
            let req = Request::new(Method::GET, "/zoo/animals/123");
            Arc::clone(&deep).dispatch(black_box(req), Response::default(), |flow| {
                black_box(flow);
            });
        })
    });
}

fn bench_match(c: &mut Criterion) {
    let layer = Layer::new(
        "/zoo/{category}/animals/{id}",
        MatchOptions::default(),
        passthrough(),
    );
    c.bench_function("match_two_params", |b| {
        b.iter(|| {
            let matched = layer.match_path(black_box("/zoo/birds/animals/77"));
            black_box(matched).expect("decode").expect("match");
        })
    });
}

criterion_group!(benches, bench_dispatch, bench_match);
criterion_main!(benches);
