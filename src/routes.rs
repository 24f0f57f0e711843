use crate::{
    api::{
        attendance, courses, departments, exams, faculty, marks, notices, students, timetable,
        topics,
    },
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let read_limiter = Arc::new(build_limiter(config.rate_read_per_min));
    let write_limiter = Arc::new(build_limiter(config.rate_write_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .wrap(read_limiter.clone())
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/update-hours, registered before the id matcher
                    .service(
                        web::resource("/update-hours")
                            .wrap(write_limiter.clone())
                            .route(web::put().to(attendance::update_attendance_hours)),
                    )
                    // /attendance/{attendance_id}
                    .service(
                        web::resource("/{attendance_id}")
                            .wrap(write_limiter.clone())
                            .route(web::put().to(attendance::update_attendance)),
                    ),
            )
            .service(
                web::scope("/marks")
                    // /marks
                    .service(
                        web::resource("")
                            .wrap(write_limiter.clone())
                            .route(web::get().to(marks::list_marks))
                            .route(web::post().to(marks::create_mark)),
                    )
                    // /marks/{id}
                    .service(
                        web::resource("/{mark_id}")
                            .wrap(write_limiter.clone())
                            .route(web::get().to(marks::get_mark))
                            .route(web::put().to(marks::update_mark))
                            .route(web::delete().to(marks::delete_mark)),
                    ),
            )
            .service(
                web::scope("/important-topics")
                    // /important-topics
                    .service(
                        web::resource("")
                            .wrap(write_limiter.clone())
                            .route(web::post().to(topics::create_topic)),
                    )
                    // /important-topics/subjects, registered before the course matcher
                    .service(
                        web::resource("/subjects")
                            .wrap(read_limiter.clone())
                            .route(web::get().to(topics::list_subjects)),
                    )
                    // /important-topics/{course_id}
                    .service(
                        web::resource("/{course_id}")
                            .wrap(read_limiter.clone())
                            .route(web::get().to(topics::list_topics)),
                    ),
            )
            .service(
                web::scope("/students")
                    .service(
                        web::resource("")
                            .wrap(read_limiter.clone())
                            .route(web::get().to(students::list_students)),
                    )
                    .service(
                        web::resource("/{student_id}")
                            .wrap(read_limiter.clone())
                            .route(web::get().to(students::get_student)),
                    ),
            )
            .service(
                web::resource("/enrollments")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(students::list_enrollments)),
            )
            .service(
                web::resource("/sections")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(students::list_sections)),
            )
            .service(
                web::resource("/courses")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(courses::list_courses)),
            )
            .service(
                web::resource("/faculty")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(faculty::list_faculty)),
            )
            .service(
                web::resource("/faculty-advisor")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(faculty::get_faculty_advisor)),
            )
            .service(
                web::resource("/departments")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(departments::list_departments)),
            )
            .service(
                web::resource("/notices")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(notices::list_notices)),
            )
            .service(
                web::resource("/exams")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(exams::list_exams)),
            )
            .service(
                web::resource("/exam-subjects/{exam_id}")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(exams::list_exam_subjects)),
            )
            .service(
                web::resource("/timetable/generate")
                    .wrap(read_limiter.clone())
                    .route(web::get().to(timetable::generate_timetable)),
            ),
    );
}
