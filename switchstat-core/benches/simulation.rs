use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion,
    Throughput,
};
use switchstat_core::{report, Simulation, SimulationConfig};

const RUNTIME: i64 = 3_600;

fn config(total_ports: i64) -> SimulationConfig {
    SimulationConfig {
        total_ports,
        runtime: RUNTIME,
        vlan: 1,
        ..SimulationConfig::default()
    }
}

fn bench_step_size(group: &mut BenchmarkGroup<'_, WallTime>, size: i64) {
    let mut simulation = Simulation::new(&config(size), 42);

    group.throughput(Throughput::Elements(size as u64));
    group.bench_function(format!("{size} ports"), |b| {
        b.iter(|| {
            // start over once the runtime is exhausted
            if simulation.is_finished() {
                simulation = Simulation::new(&config(size), 42);
            }
            black_box(simulation.step())
        })
    });
}

fn step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for size in [8, 48, 96, 192, 384, 684] {
        bench_step_size(&mut group, size);
    }

    group.finish();
}

fn render(c: &mut Criterion) {
    let mut simulation = Simulation::new(
        &SimulationConfig {
            runtime: 10,
            ..config(48)
        },
        42,
    );
    simulation.run();

    c.bench_function("render 48 ports", |b| {
        b.iter(|| report::render(black_box(simulation.interfaces())))
    });
}

criterion_group!(benches, step, render);
criterion_main!(benches);
