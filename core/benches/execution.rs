//! Benchmarks for compiled expression execution.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. execute_only: Runs a program compiled once, the per-record hot path
//! 2. compile_and_execute: Compiles on every iteration (for comparison)
//! 3. cached_compile: Engine lookups for an already-cached tree

use bumpalo::Bump;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stellar_core::{
    api::{CompilationOptions, Context, Engine, ExecutionOptions, ExpressionState},
    compiler::StackCompiler,
    parser::{Node, TreeBuilder},
    resolver::{FunctionRegistry, MapVariableResolver},
};

/// Build `x + 1 + 1 + ... + 1` with `n` additions.
fn arithmetic_chain<'a>(b: &TreeBuilder<'a>, n: usize) -> &'a Node<'a> {
    let mut tree = b.variable("x");
    for _ in 0..n {
        tree = b.add(tree, b.int("1"));
    }
    tree
}

fn bench_execute_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute_only");

    for size in [10, 100, 400] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, &size| {
            let arena = Bump::new();
            let b = TreeBuilder::new(&arena);
            let engine = Engine::default();
            let expression = engine.compile(arithmetic_chain(&b, size)).expect("Compile failed");
            let variables = MapVariableResolver::new().with("x", 1_i64);
            let state = ExpressionState::with_variables(&variables);
            let options = ExecutionOptions::default();

            bench.iter(|| {
                let result = expression.execute_with(black_box(&state), &options);
                black_box(result.expect("Execution failed"))
            });
        });
    }

    group.finish();
}

fn bench_compile_and_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_and_execute");

    for size in [10, 100, 400] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, &size| {
            let arena = Bump::new();
            let b = TreeBuilder::new(&arena);
            let tree = arithmetic_chain(&b, size);
            let variables = MapVariableResolver::new().with("x", 1);
            let state = ExpressionState::with_variables(&variables);
            let options = CompilationOptions::default();

            bench.iter(|| {
                let program = StackCompiler::compile(black_box(tree), &options)
                    .expect("Compile failed");
                let vm = stellar_core::vm::VM::new(&program, &state, &ExecutionOptions::default());
                black_box(vm.run().expect("Execution failed"))
            });
        });
    }

    group.finish();
}

fn bench_cached_compile(c: &mut Criterion) {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let tree = b.call(
        Some("BLOOM"),
        "EXISTS",
        &[b.variable("seen"), b.variable("user")],
    );
    let engine = Engine::default();
    engine.compile(tree).expect("Compile failed");

    c.bench_function("cached_compile", |bench| {
        bench.iter(|| black_box(engine.compile(black_box(tree)).expect("Compile failed")))
    });

    let functions = FunctionRegistry::with_stdlib();
    let context = Context::new();
    let seen = {
        let init = b.call(Some("BLOOM"), "INIT", &[]);
        let add = b.call(Some("BLOOM"), "ADD", &[init, b.string("casey")]);
        let empty = MapVariableResolver::new();
        let state = ExpressionState::new(&context, &empty, &functions);
        let expression = engine.compile(add).expect("Compile failed");
        expression
            .execute(&state)
            .expect("Execution failed")
            .into_value()
    };
    let variables = MapVariableResolver::new()
        .with("seen", seen)
        .with("user", "casey");
    let state = ExpressionState::new(&context, &variables, &functions);
    let expression = engine.compile(tree).expect("Compile failed");

    c.bench_function("bloom_exists", |bench| {
        bench.iter(|| black_box(expression.execute(black_box(&state)).expect("Execution failed")))
    });
}

criterion_group!(
    benches,
    bench_execute_only,
    bench_compile_and_execute,
    bench_cached_compile
);
criterion_main!(benches);
