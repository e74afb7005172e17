use armature_users::prelude::*;
use armature_users::users::params;
use armature_validation::{Evaluator, Rule};
use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn valid_user() -> UserRequest {
    UserRequest {
        id: None,
        name: Some("Alice".to_string()),
        email: Some("alice@example.com".to_string()),
        username: Some("alice_01".to_string()),
        age: Some(30),
        date_of_birth: NaiveDate::from_ymd_opt(1994, 3, 1),
        address: Some(Address {
            line1: Some("12 MG Road".to_string()),
            city: Some("Bengaluru".to_string()),
            pincode: Some("560001".to_string()),
        }),
        roles: Some(vec!["admin".to_string(), "user".to_string()]),
        password: Some("secret123".to_string()),
        confirm_password: Some("secret123".to_string()),
    }
}

fn bench_rule_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_evaluation");

    let ctx = ValidationContext::new();
    let owner = UserRequest::default();

    let email = Rule::email();
    group.bench_function("email_valid", |b| {
        b.iter(|| Evaluator::evaluate(&email, black_box(&Value::Str("user@example.com")), &owner, &ctx))
    });
    group.bench_function("email_invalid", |b| {
        b.iter(|| Evaluator::evaluate(&email, black_box(&Value::Str("invalid-email")), &owner, &ctx))
    });

    let size = Rule::size(Some(3), Some(20));
    group.bench_function("size", |b| {
        b.iter(|| Evaluator::evaluate(&size, black_box(&Value::Str("john_doe123")), &owner, &ctx))
    });

    let range = Rule::range(Some(18), Some(120));
    group.bench_function("range", |b| {
        b.iter(|| Evaluator::evaluate(&range, black_box(&Value::Int(42)), &owner, &ctx))
    });

    let pattern = Rule::try_pattern("[A-Za-z0-9_]+").unwrap();
    group.bench_function("pattern", |b| {
        b.iter(|| Evaluator::evaluate(&pattern, black_box(&Value::Str("john_doe123")), &owner, &ctx))
    });

    let no_whitespace = armature_users::users::no_whitespace();
    group.bench_function("custom_no_whitespace", |b| {
        b.iter(|| Evaluator::evaluate(&no_whitespace, black_box(&Value::Str("john_doe123")), &owner, &ctx))
    });

    group.bench_function("regex_compile", |b| {
        b.iter(|| Rule::try_pattern(black_box("^[0-9]{6}$")).unwrap())
    });

    group.finish();
}

fn bench_graph_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_validation");

    let validation = UserValidation::new().unwrap();
    let valid = valid_user();
    let invalid = UserRequest {
        name: Some(String::new()),
        email: Some("bad".to_string()),
        age: Some(10),
        roles: Some(vec!["admin".to_string(), " ".to_string()]),
        confirm_password: Some("other".to_string()),
        ..valid_user()
    };

    group.bench_function("valid_create", |b| {
        b.iter(|| validation.check(black_box(&valid), &[GroupId::ON_CREATE]))
    });

    group.bench_function("invalid_create", |b| {
        b.iter(|| validation.check(black_box(&invalid), &[GroupId::ON_CREATE]))
    });

    group.bench_function("valid_update", |b| {
        b.iter(|| validation.check(black_box(&valid), &[GroupId::ON_UPDATE]))
    });

    group.bench_function("invalid_create_envelope", |b| {
        b.iter(|| {
            validation
                .check(black_box(&invalid), &[GroupId::ON_CREATE])
                .to_envelope()
                .to_json()
        })
    });

    group.finish();
}

fn bench_body_pipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("body_pipe");

    let validation = UserValidation::new().unwrap();
    let body = serde_json::to_vec(&valid_user()).unwrap();

    group.bench_function("parse_and_validate", |b| {
        b.iter(|| validation.create(black_box(&body)))
    });

    group.finish();
}

fn bench_parameters(c: &mut Criterion) {
    let mut group = c.benchmark_group("parameters");

    let validator = UserValidation::new().unwrap().validator().clone();

    group.bench_function("search", |b| {
        b.iter(|| validator.validate_arguments(&params::search(black_box("abc"), Some(10)), &[]))
    });

    group.bench_function("by_username", |b| {
        b.iter(|| validator.validate_arguments(&params::by_username(black_box("abc_1")), &[]))
    });

    group.finish();
}

criterion_group!(
    validation_benches,
    bench_rule_evaluation,
    bench_graph_validation,
    bench_body_pipe,
    bench_parameters,
);

criterion_main!(validation_benches);
