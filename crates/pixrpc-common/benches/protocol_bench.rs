// Criterion benchmarks for the pixrpc-common protocol layer
//
// Run benchmarks with:
//   cargo bench -p pixrpc-common

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixrpc_common::transport::PostcardCodec;
use pixrpc_common::{Request, Response, RpcReply, RpcRequest};

fn bench_request_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_creation");

    group.bench_function("add_request", |b| {
        b.iter(|| Request::new(black_box(RpcRequest::Add { a: 5, b: 10 })));
    });

    group.bench_function("dot_product_request", |b| {
        let a: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let v = a.clone();
        b.iter(|| {
            Request::new(black_box(RpcRequest::DotProduct {
                a: a.clone(),
                b: v.clone(),
            }))
        });
    });

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    group.bench_function("encode_small", |b| {
        let req = Request::new(RpcRequest::Add { a: 5, b: 10 });
        b.iter(|| PostcardCodec::encode_request(black_box(&req)));
    });

    group.bench_function("encode_vector", |b| {
        let v: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let req = Request::new(RpcRequest::DotProduct { a: v.clone(), b: v });
        b.iter(|| PostcardCodec::encode_request(black_box(&req)));
    });

    group.bench_function("encode_image_payload", |b| {
        let req = Request::new(RpcRequest::RawImage { img: vec![0xAB; 64 * 1024] });
        b.iter(|| PostcardCodec::encode_request(black_box(&req)));
    });

    group.bench_function("decode_response", |b| {
        let resp = Response::success(1, RpcReply::Image { width: 1920, height: 1080 });
        let encoded = PostcardCodec::encode_response(&resp).unwrap();
        b.iter(|| PostcardCodec::decode_response(black_box(&encoded)));
    });

    group.finish();
}

criterion_group!(benches, bench_request_creation, bench_codec);
criterion_main!(benches);
