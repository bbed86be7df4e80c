/*!
# List Benchmarks

Filtering and sorting cost of the task and project list views.

## Usage

```bash
# Run all benchmarks
cargo bench --bench list_benchmarks

# Only the in-memory sort engine
cargo bench --bench list_benchmarks -- "Sort Engine"

# Quick benchmark with fewer samples
cargo bench --bench list_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use axum::{
    Router,
    body::Body,
    http::{Method, Request},
};
use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::hint::black_box;
use std::time::Duration;
use taskboard::Migrator;
use taskboard::entities::{TaskStatus, project};
use taskboard::filtering::{ProjectSortKey, SortOrder, compare_projects};
use taskboard::models::{EmployeeForm, ProjectForm, TaskForm};
use taskboard::operations::{employees, projects, tasks};
use tokio::runtime::Runtime;
use tower::ServiceExt;

const FIRST_NAMES: [&str; 5] = ["Ann", "Bob", "Cid", "Dee", "Eve"];

async fn setup_benchmark_db(task_count: usize) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    let mut staff = Vec::new();
    for (i, first) in FIRST_NAMES.iter().enumerate() {
        let form = EmployeeForm {
            first_name: (*first).to_string(),
            last_name: "Smith".to_string(),
            middle_name: None,
            email: format!("{}{i}@bench.io", first.to_lowercase()),
        };
        staff.push(employees::create(&db, &form).await.map_err(|e| DbErr::Custom(e.to_string()))?);
    }

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let form = ProjectForm {
        name: "Bench".to_string(),
        customer_company: "Acme".to_string(),
        executor_company: "Initech".to_string(),
        start_date: start,
        end_date: start + Days::new(90),
        priority: 1,
        leader_id: staff[0],
    };
    let project_id = projects::create(&db, &form)
        .await
        .map_err(|e| DbErr::Custom(e.to_string()))?;
    projects::add_employees(&db, project_id, Some(staff.as_slice()))
        .await
        .map_err(|e| DbErr::Custom(e.to_string()))?;

    for i in 0..task_count {
        let form = TaskForm {
            name: format!("Task {:05}", (i * 7919) % task_count),
            description: "Benchmark work item".to_string(),
            project_id,
            author_id: staff[i % staff.len()],
            executor_id: staff[(i + 2) % staff.len()],
            status: TaskStatus::ALL[i % 3].as_i32(),
            priority: i32::try_from(i % 5).unwrap_or_default(),
        };
        tasks::create(&db, &form)
            .await
            .map_err(|e| DbErr::Custom(e.to_string()))?;
    }

    Ok(db)
}

async fn get(app: Router, uri: &str) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
}

fn bench_task_list(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    for size in [100, 500] {
        let db = rt.block_on(setup_benchmark_db(size)).unwrap();
        let app = taskboard::app(&db);

        let mut group = c.benchmark_group(format!("Task List ({size} tasks)"));
        group.measurement_time(Duration::from_secs(10));

        for query in [
            "/Tasks",
            "/Tasks?sortOrder=priorityDesc",
            "/Tasks?sortOrder=executor",
            "/Tasks?status=Done&priority=2",
        ] {
            group.bench_with_input(BenchmarkId::new("get", query), &query, |b, query| {
                b.iter(|| rt.block_on(black_box(get(app.clone(), query))));
            });
        }

        group.finish();
    }
}

fn synthetic_projects(count: i32) -> Vec<project::Model> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..count)
        .map(|id| project::Model {
            id,
            name: format!("Project {:05}", (id * 7919) % count),
            customer_company: format!("Customer {}", id % 17),
            executor_company: format!("Executor {}", id % 11),
            start_date: start + Days::new(u64::try_from(id % 365).unwrap_or_default()),
            end_date: start + Days::new(400),
            priority: id % 5,
            leader_id: 1,
            row_version: 0,
        })
        .collect()
}

fn bench_sort_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sort Engine");

    for size in [1_000, 10_000] {
        let projects = synthetic_projects(size);
        for token in ["name", "priorityDesc", "startDate"] {
            let order = SortOrder::<ProjectSortKey>::parse(Some(token));
            group.bench_with_input(BenchmarkId::new(token, size), &projects, |b, projects| {
                b.iter(|| {
                    let mut rows = projects.clone();
                    order.sort(&mut rows, compare_projects);
                    black_box(rows)
                });
            });
        }
    }

    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
        .with_plots()
        .with_output_color(true)
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_task_list, bench_sort_engine
}
criterion_main!(benches);
