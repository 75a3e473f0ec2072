// p8cart - A codec for PICO-8 cartridge containers
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Performance benchmarks for the cartridge codec.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use p8cart::code::{compress, decompress};
use p8cart::memory::CODE;
use p8cart::{decode, Cartridge, CodecConfig, Format, Label};

// ============================================================================
// Benchmark Inputs
// ============================================================================

/// A cartridge with every data section filled and a few KiB of code.
fn full_cart() -> Cartridge {
    let mut cart = Cartridge::new();
    let mut state = 0x1234_5678u32;
    for byte in &mut cart.memory_mut().as_bytes_mut()[..CODE.offset] {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *byte = state as u8;
    }

    let mut code = String::new();
    for i in 0..200 {
        code.push_str(&format!("function f{}(x)\n  return x*{}+1\nend\n", i, i));
    }
    cart.set_code(code.into_bytes());
    cart.set_label(Some(Label::from_indices(&[7; 128 * 128])));
    cart
}

fn encoded(cart: &Cartridge, format: Format) -> Vec<u8> {
    cart.encode(format, &CodecConfig::default())
        .expect("Failed to encode benchmark input")
}

// ============================================================================
// Decode Benchmarks
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let cart = full_cart();
    let mut group = c.benchmark_group("decode");

    for format in [Format::P8, Format::Png, Format::Js] {
        let bytes = encoded(&cart, format);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("full", format), &bytes, |b, bytes| {
            b.iter(|| decode(format, black_box(bytes)))
        });
    }

    let hello = include_str!("../tests/fixtures/hello.p8");
    group.throughput(Throughput::Bytes(hello.len() as u64));
    group.bench_function("hello_p8", |b| {
        b.iter(|| decode(Format::P8, black_box(hello.as_bytes())))
    });

    group.finish();
}

// ============================================================================
// Encode Benchmarks
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let cart = full_cart();
    let config = CodecConfig::default();
    let mut group = c.benchmark_group("encode");

    for format in [Format::P8, Format::Png, Format::Js] {
        group.bench_with_input(BenchmarkId::new("full", format), &cart, |b, cart| {
            b.iter(|| cart.encode(format, black_box(&config)))
        });
    }

    group.finish();
}

// ============================================================================
// Code Compression Benchmarks
// ============================================================================

fn bench_compression(c: &mut Criterion) {
    let cart = full_cart();
    let code = cart.code().to_vec();
    let packed = compress(&code).expect("Failed to compress benchmark input");

    let mut group = c.benchmark_group("code");
    group.throughput(Throughput::Bytes(code.len() as u64));
    group.bench_function("compress", |b| b.iter(|| compress(black_box(&code))));
    group.bench_function("decompress", |b| b.iter(|| decompress(black_box(&packed))));
    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_decode, bench_encode, bench_compression);
criterion_main!(benches);
