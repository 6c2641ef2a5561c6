use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rigid2d::{
    collide, collide_pairs,
    integration::{integrate_positions, integrate_velocities, reset_forces},
    DampedSpring, RigidBody, Shape, StepConfig, Vec2,
};

fn box_verts(half: f64) -> [Vec2; 4] {
    [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
}

// --- Helper for creating stack benchmarks ---
fn build_circle_stack(num_circles: usize) -> (Vec<RigidBody>, Vec<Shape>) {
    let radius = 0.5;
    let mut bodies = Vec::with_capacity(num_circles);
    for i in 0..num_circles {
        let mut body = RigidBody::new(1.0, 1.0);
        // Slight overlap so every neighbouring pair produces a contact
        body.position = Vec2::new(0.0, radius + i as f64 * radius * 1.9);
        bodies.push(body);
    }
    let shapes = bodies.iter().map(|b| Shape::circle(b, radius, Vec2::ZERO)).collect();
    (bodies, shapes)
}

fn run_circle_stack(bodies: &mut [RigidBody], shapes: &mut [Shape], config: &StepConfig, steps: usize) {
    for _ in 0..steps {
        integrate_velocities(bodies, config);
        integrate_positions(bodies, config.timestep);
        reset_forces(bodies);
        for (shape, body) in shapes.iter_mut().zip(bodies.iter()) {
            shape.update(body);
        }
        let pairs: Vec<(&Shape, &Shape)> = shapes.windows(2).map(|w| (&w[0], &w[1])).collect();
        let contacts = collide_pairs(&pairs).expect("circle pairs are supported");
        black_box(contacts);
    }
}

// Benchmark for a stack of circles falling under gravity
fn bench_circle_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle_stack");
    let config = StepConfig::default();

    for num_circles in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_circles), num_circles, |b, &n| {
            b.iter(|| {
                let (mut bodies, mut shapes) = build_circle_stack(black_box(n));
                run_circle_stack(&mut bodies, &mut shapes, &config, 30);
            });
        });
    }
    group.finish();
}

// Benchmark for a chain of bodies linked by springs
fn bench_spring_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring_chain");
    let config = StepConfig::default();
    let link_length = 0.5;

    for num_links in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_links), num_links, |b, &n| {
            b.iter(|| {
                let mut bodies: Vec<RigidBody> = (0..=n)
                    .map(|i| {
                        let mut body = RigidBody::new(1.0, 1.0);
                        body.position = Vec2::new(i as f64 * link_length, 5.0);
                        body
                    })
                    .collect();
                // Static anchor
                bodies[0].set_mass(f64::INFINITY);
                bodies[0].set_moment(f64::INFINITY);

                let springs: Vec<DampedSpring> = (0..n)
                    .map(|i| {
                        DampedSpring::new(i, i + 1, Vec2::ZERO, Vec2::ZERO, link_length)
                            .with_stiffness(100.0)
                            .with_damping(2.0)
                    })
                    .collect();

                for _ in 0..30 {
                    for spring in &springs {
                        spring.apply(&mut bodies, config.timestep);
                    }
                    integrate_velocities(&mut bodies, &config);
                    integrate_positions(&mut bodies, config.timestep);
                    reset_forces(&mut bodies);
                }
                black_box(&bodies);
            });
        });
    }
    group.finish();
}

// Narrow phase only: one overlapping pair per shape combination
fn bench_narrow_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrow_phase");

    let mut a = RigidBody::new(1.0, 1.0);
    a.set_angle(0.1);
    let mut b = RigidBody::new(1.0, 1.0);
    b.position = Vec2::new(0.3, 1.6);
    b.set_angle(-0.2);

    let circle_a = Shape::circle(&a, 1.0, Vec2::ZERO);
    let circle_b = Shape::circle(&b, 0.75, Vec2::ZERO);
    let segment_a = Shape::segment(&a, Vec2::new(-2.0, 0.8), Vec2::new(2.0, 0.8), 0.25);
    let poly_a = Shape::polygon(&a, &box_verts(1.0), Vec2::ZERO).expect("valid box");
    let poly_b = Shape::polygon(&b, &box_verts(0.75), Vec2::ZERO).expect("valid box");

    let cases = [
        ("circle_circle", &circle_a, &circle_b),
        ("circle_polygon", &circle_a, &poly_b),
        ("segment_polygon", &segment_a, &poly_b),
        ("polygon_polygon", &poly_a, &poly_b),
    ];
    for (name, first, second) in cases {
        group.bench_function(name, |bench| {
            bench.iter(|| collide(black_box(first), black_box(second)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_circle_stack, bench_spring_chain, bench_narrow_phase);
criterion_main!(benches);
