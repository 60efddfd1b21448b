//! Caller-side cross-reference upkeep between sections and their members.
//!
//! # Responsibility
//! - Update both sides of a section/member link and persist both records.
//!
//! # Invariants
//! - `Section` never cascades on its own; only these helpers touch both sides.
//! - Each helper validates the section change before writing anything.
//! - The member file is written before the section file, so a failed second
//!   write never leaves a section listing a member that does not point back.
//! - An adviser is not also a taught-section teacher on either side.

use crate::model::record::Record;
use crate::model::section::Section;
use crate::model::student::Student;
use crate::model::teacher::Teacher;
use crate::store::{RecordFile, StoreResult};
use log::info;

/// Adds `student` to `section` and points the student at the section.
pub fn enroll_student(section: &mut Section, student: &mut Student) -> StoreResult<()> {
    section.add_student(student);
    student.section = Some(section.path().to_path_buf());
    persist_pair(&*student, section)?;
    info!("event=roster_enroll module=service status=ok");
    Ok(())
}

/// Removes `student` from `section` and clears the student's section if it
/// pointed there.
///
/// # Errors
/// - `NotFound` when the student is not listed in the section.
pub fn withdraw_student(section: &mut Section, student: &mut Student) -> StoreResult<()> {
    section.remove_student(student)?;
    if student.section.as_deref() == Some(section.path()) {
        student.section = None;
    }
    persist_pair(&*student, section)?;
    info!("event=roster_withdraw module=service status=ok");
    Ok(())
}

/// Lists `teacher` under `section` and records the section on the teacher.
pub fn assign_teacher(section: &mut Section, teacher: &mut Teacher) -> StoreResult<()> {
    section.add_teacher(teacher);
    teacher.add_taught_section(section.name.clone(), section.path());
    persist_pair(&*teacher, section)?;
    info!("event=roster_assign_teacher module=service status=ok");
    Ok(())
}

/// Removes `teacher` from the section's teacher list and its taught sections.
///
/// # Errors
/// - `NotFound` when the teacher is not listed in the section.
pub fn unassign_teacher(section: &mut Section, teacher: &mut Teacher) -> StoreResult<()> {
    section.remove_teacher(teacher)?;
    teacher.remove_taught_section(section.path());
    persist_pair(&*teacher, section)?;
    info!("event=roster_unassign_teacher module=service status=ok");
    Ok(())
}

/// Makes `teacher` the section's adviser and the section the teacher's advisory.
///
/// A teacher already listed under the section moves from the teacher list to
/// the adviser slot on both sides.
pub fn assign_adviser(section: &mut Section, teacher: &mut Teacher) -> StoreResult<()> {
    section.set_adviser(Some(teacher.path()));
    teacher.remove_taught_section(section.path());
    teacher.advisory = Some(section.path().to_path_buf());
    persist_pair(&*teacher, section)?;
    info!("event=roster_assign_adviser module=service status=ok");
    Ok(())
}

fn persist_pair<T: RecordFile>(member: &T, section: &Section) -> StoreResult<()> {
    section.validate()?;
    member.dump()?;
    section.dump()
}
