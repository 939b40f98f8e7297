//! Student progress report
//!
//! Collects a student's workouts and progress history into a report and
//! writes it as CSV. Layout follows the printed report: student details,
//! statistics, the current workout sheet, then per-exercise evolution.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use csv::WriterBuilder;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{EvolutionPoint, ProgressRecord, User, Workout};
use crate::periodization::{parse_completed_at, round1};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EvolutionSummary {
  pub exercise: String,
  pub first_weight: f64,
  pub first_date: String,
  pub last_weight: f64,
  pub last_date: String,
  /// Last minus first, one decimal
  pub diff: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
  pub student: User,
  pub workouts: Vec<Workout>,
  pub progress_count: usize,
  pub exercises_count: usize,
  /// Points per exercise, oldest first
  pub evolution: BTreeMap<String, Vec<EvolutionPoint>>,
  pub generated_at: DateTime<Utc>,
}

pub fn build_student_report(
  student: User,
  workouts: Vec<Workout>,
  progress: &[ProgressRecord],
  generated_at: DateTime<Utc>,
) -> StudentReport {
  let exercises_count = progress
    .iter()
    .map(|p| p.exercise_name.as_str())
    .collect::<HashSet<_>>()
    .len();

  let mut evolution: BTreeMap<String, Vec<EvolutionPoint>> = BTreeMap::new();
  for record in progress.iter().filter(|p| !p.sets_completed.is_empty()) {
    evolution
      .entry(record.exercise_name.clone())
      .or_default()
      .push(EvolutionPoint {
        date: record.logged_at.chars().take(10).collect(),
        weight: record.max_weight(),
        reps: record.total_reps(),
        exercise: record.exercise_name.clone(),
      });
  }
  for points in evolution.values_mut() {
    points.sort_by(|a, b| a.date.cmp(&b.date));
  }

  StudentReport {
    student,
    workouts,
    progress_count: progress.len(),
    exercises_count,
    evolution,
    generated_at,
  }
}

/// `relatorio_{name}_{yyyy-mm-dd}` with whitespace runs in the name replaced by `_`
pub fn report_file_name(student_name: &str, date: NaiveDate) -> String {
  let name = student_name.split_whitespace().collect::<Vec<_>>().join("_");
  format!("relatorio_{}_{}", name, date.format("%Y-%m-%d"))
}

impl StudentReport {
  /// First vs last load for every exercise logged at least twice
  pub fn evolution_summaries(&self) -> Vec<EvolutionSummary> {
    self
      .evolution
      .iter()
      .filter(|(_, points)| points.len() >= 2)
      .filter_map(|(exercise, points)| {
        let first = points.first()?;
        let last = points.last()?;
        Some(EvolutionSummary {
          exercise: exercise.clone(),
          first_weight: first.weight,
          first_date: first.date.clone(),
          last_weight: last.weight,
          last_date: last.date.clone(),
          diff: round1(last.weight - first.weight),
        })
      })
      .collect()
  }

  pub fn file_name(&self) -> String {
    report_file_name(&self.student.name, self.generated_at.date_naive())
  }
}

fn signed_kg(diff: f64) -> String {
  if diff > 0.0 {
    format!("+{:.1}kg", diff)
  } else {
    format!("{:.1}kg", diff)
  }
}

fn display_date(raw: &str) -> String {
  parse_completed_at(raw, &Utc)
    .map(|dt| dt.format("%d/%m/%Y").to_string())
    .unwrap_or_else(|| raw.to_string())
}

/// ---------------------------------------------------------------------------
/// CSV Export
/// ---------------------------------------------------------------------------

pub fn write_report_csv<W: Write>(report: &StudentReport, out: W) -> Result<(), ApiError> {
  let mut writer = WriterBuilder::new().flexible(true).from_writer(out);
  let student = &report.student;

  writer.write_record(["Relatório de Progresso"])?;
  writer.write_record(["Nome", student.name.as_str()])?;
  writer.write_record(["Email", student.email.as_str()])?;
  writer.write_record(["Telefone", student.phone.as_deref().unwrap_or("Não informado")])?;
  writer.write_record(["Cadastro", display_date(&student.created_at).as_str()])?;

  writer.write_record(["Métrica", "Valor"])?;
  writer.write_record(["Total de Treinos Registrados", report.progress_count.to_string().as_str()])?;
  writer.write_record(["Exercícios Diferentes", report.exercises_count.to_string().as_str()])?;
  writer.write_record(["Treinos Ativos", report.workouts.len().to_string().as_str()])?;

  if let Some(workout) = report.workouts.first() {
    writer.write_record(["Treino Atual", workout.name.as_str()])?;
    writer.write_record(["Dia", "Exercício", "Grupo", "Séries x Reps", "Carga"])?;
    for day in &workout.days {
      for exercise in &day.exercises {
        let sets = exercise.sets.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
        let reps = exercise.reps.as_deref().unwrap_or("-");
        writer.write_record([
          day.day_name.as_str(),
          exercise.name.as_str(),
          exercise.muscle_group.as_deref().unwrap_or("-"),
          format!("{}x {}", sets, reps).as_str(),
          exercise.weight.as_deref().filter(|w| !w.is_empty()).unwrap_or("-"),
        ])?;
      }
    }
  }

  let summaries = report.evolution_summaries();
  if !summaries.is_empty() {
    writer.write_record([
      "Exercício",
      "Primeira carga",
      "Data",
      "Última carga",
      "Data",
      "Evolução",
    ])?;
    for s in &summaries {
      writer.write_record([
        s.exercise.as_str(),
        format!("{}kg", s.first_weight).as_str(),
        s.first_date.as_str(),
        format!("{}kg", s.last_weight).as_str(),
        s.last_date.as_str(),
        signed_kg(s.diff).as_str(),
      ])?;
    }
  }

  let generated = report.generated_at.format("%d/%m/%Y %H:%M").to_string();
  writer.write_record(["Gerado em", generated.as_str()])?;
  writer.flush()?;
  Ok(())
}

/// Write the report to `path`
pub fn save_report_csv(report: &StudentReport, path: &Path) -> Result<(), ApiError> {
  let file = std::fs::File::create(path)?;
  write_report_csv(report, file)?;
  tracing::info!(path = %path.display(), "Report written");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{Role, SetEntry};
  use crate::test_utils::{mock_user, mock_workout};
  use chrono::TimeZone;

  fn record(exercise: &str, logged_at: &str, sets: &[(f64, i64)]) -> ProgressRecord {
    ProgressRecord {
      id: format!("{}-{}", exercise, logged_at),
      student_id: "s1".into(),
      workout_id: "w1".into(),
      exercise_name: exercise.into(),
      sets_completed: sets
        .iter()
        .enumerate()
        .map(|(i, (weight, reps))| SetEntry {
          set: i as u32 + 1,
          weight: *weight,
          reps: *reps,
        })
        .collect(),
      notes: None,
      logged_at: logged_at.into(),
    }
  }

  fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 14, 30, 0).unwrap()
  }

  fn sample_report() -> StudentReport {
    let mut student = mock_user("s1", Role::Student);
    student.name = "Maria  da Silva".into();
    let progress = vec![
      record("Supino Reto", "2024-02-10T10:00:00", &[(65.0, 8), (62.5, 8)]),
      record("Supino Reto", "2024-01-05T10:00:00", &[(60.0, 10), (60.0, 10)]),
      record("Agachamento", "2024-01-06T10:00:00", &[(80.0, 10)]),
      record("Remada", "2024-01-07T10:00:00", &[]),
    ];
    build_student_report(student, vec![mock_workout("w1", "Hipertrofia A")], &progress, generated_at())
  }

  #[test]
  fn test_counts_and_evolution() {
    let report = sample_report();
    assert_eq!(report.progress_count, 4);
    assert_eq!(report.exercises_count, 3);

    let supino = &report.evolution["Supino Reto"];
    assert_eq!(supino.len(), 2);
    assert_eq!(supino[0].date, "2024-01-05");
    assert_eq!(supino[0].weight, 60.0);
    assert_eq!(supino[0].reps, 20);
    assert_eq!(supino[1].weight, 65.0);
    // Records without sets have no evolution point
    assert!(!report.evolution.contains_key("Remada"));
  }

  #[test]
  fn test_summaries_need_two_points() {
    let summaries = sample_report().evolution_summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].exercise, "Supino Reto");
    assert_eq!(summaries[0].diff, 5.0);
    assert_eq!(summaries[0].first_date, "2024-01-05");
    assert_eq!(summaries[0].last_date, "2024-02-10");
  }

  #[test]
  fn test_file_name() {
    assert_eq!(sample_report().file_name(), "relatorio_Maria_da_Silva_2024-03-15");
    assert_eq!(
      report_file_name("Ana", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
      "relatorio_Ana_2024-01-02"
    );
  }

  #[test]
  fn test_signed_kg() {
    assert_eq!(signed_kg(5.0), "+5.0kg");
    assert_eq!(signed_kg(0.0), "0.0kg");
    assert_eq!(signed_kg(-2.5), "-2.5kg");
  }

  #[test]
  fn test_csv_sections() {
    let mut out = Vec::new();
    write_report_csv(&sample_report(), &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();

    assert!(csv.contains("Nome,Maria  da Silva\n"));
    assert!(csv.contains("Telefone,Não informado\n"));
    assert!(csv.contains("Cadastro,01/01/2024\n"));
    assert!(csv.contains("Total de Treinos Registrados,4\n"));
    assert!(csv.contains("Treino Atual,Hipertrofia A\n"));
    assert!(csv.contains("Treino A,Supino Reto,Peito,4x 10,20kg\n"));
    assert!(csv.contains("Supino Reto,60kg,2024-01-05,65kg,2024-02-10,+5.0kg\n"));
    assert!(csv.ends_with("Gerado em,15/03/2024 14:30\n"));
  }

  #[test]
  fn test_save_report_csv_writes_file() {
    let path = std::env::temp_dir().join(format!("{}.csv", sample_report().file_name()));
    save_report_csv(&sample_report(), &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("Relatório de Progresso\n"));
    let _ = std::fs::remove_file(&path);
  }
}
