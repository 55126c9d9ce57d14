use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mtschema::prelude::*;
use mtschema::validator::validate_many;
use serde_json::{json, Map, Value};

/// Build a schema table with `groups` groups of eight fields each
fn build_table(groups: usize) -> String {
    let mut table = String::from("Parameter,Explanation,Type,Compulsory/Optional\n");
    for g in 0..groups {
        table.push_str(&format!(
            "group{g}/component_s,Component [ Ex | Ey | Hx | Hy | Hz | ... ],string,compulsory\n\
             group{g}/channel_i,Channel number [ 1 | 2 | 3 | 4 | 5 | 6 | ... ],integer,compulsory\n\
             group{g}/azimuth_d,Azimuth [ 0 to 360 ] [ degrees ],float,compulsory\n\
             group{g}/dipole_length_d,Dipole length [ m ],float,optional\n\
             group{g}/sensor/type_s,Sensor type,string,optional\n\
             group{g}/sensor/id_s,Sensor serial number,string,optional\n\
             group{g}/start_time/ascii_s,Start time,string,optional\n\
             group{g}/start_time/epoch_l,Start time [ s ],integer,optional\n"
        ));
    }
    table
}

/// Instance filling every field of `build_table(groups)`
fn build_instance(groups: usize) -> Value {
    let mut root = Map::new();
    for g in 0..groups {
        root.insert(
            format!("group{g}"),
            json!({
                "component": "Ex",
                "channel": (g % 6) + 1,
                "azimuth": (g * 7 % 360) as f64,
                "dipole_length": 100.0,
                "sensor": {"type": "Pb-PbCl", "id": format!("{}", 4000 + g)},
                "start_time": {"ascii": "2020-06-02T18:41:43", "epoch": 1591123303}
            }),
        );
    }
    Value::Object(root)
}

fn bench_schema_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_load");

    for groups in [10, 100, 500] {
        let table = build_table(groups);
        group.throughput(Throughput::Elements((groups * 8) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(groups * 8), &table, |b, table| {
            b.iter(|| {
                let rows = read_csv(black_box(table.as_bytes()), b',').unwrap();
                load(&rows).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for groups in [10, 100, 500] {
        let tree = load(&read_csv(build_table(groups).as_bytes(), b',').unwrap()).unwrap();
        let instance = build_instance(groups);

        group.throughput(Throughput::Elements(tree.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tree.len()), &instance, |b, instance| {
            b.iter(|| validate(&tree, black_box(instance)));
        });
    }

    group.finish();
}

fn bench_validate_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_many");
    let tree = load(&read_csv(build_table(50).as_bytes(), b',').unwrap()).unwrap();
    let options = ValidationOptions::default();

    for batch in [10, 100] {
        let instances: Vec<Value> = (0..batch).map(|_| build_instance(50)).collect();
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch), &instances, |b, instances| {
            b.iter(|| validate_many(&tree, black_box(instances), &options));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_schema_load, bench_validate, bench_validate_many);
criterion_main!(benches);
