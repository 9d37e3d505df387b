pub mod team_student_association;
