use chrono::NaiveDate;

use super::domain::{
    Availability, ClientReview, Education, PortfolioProject, SpokenLanguage,
    TalentId, TalentProfile, TalentRecord, WorkHistoryEntry,
};

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    name: &str,
    title: &str,
    portrait: &str,
    rating: f32,
    hourly_rate: u32,
    skills: &[&str],
    match_score: u8,
    availability: Availability,
    verified: bool,
) -> TalentRecord {
    TalentRecord {
        id: TalentId::new(id),
        name: name.to_string(),
        title: title.to_string(),
        avatar: format!("https://randomuser.me/api/portraits/{portrait}.jpg"),
        rating,
        hourly_rate,
        skills: skills.iter().collect(),
        match_score,
        availability,
        verified,
    }
}

/// The nine engineers the search page lists.
pub(crate) fn talent_records() -> Vec<TalentRecord> {
    use Availability::*;

    vec![
        record(
            "1",
            "Alex Johnson",
            "Senior Frontend Developer",
            "men/32",
            4.9,
            85,
            &["React", "TypeScript", "Next.js", "TailwindCSS", "GraphQL"],
            98,
            Immediate,
            true,
        ),
        record(
            "2",
            "Sarah Chen",
            "Full Stack Engineer",
            "women/44",
            4.8,
            95,
            &["Node.js", "React", "MongoDB", "AWS", "Docker"],
            92,
            WithinOneWeek,
            true,
        ),
        record(
            "3",
            "Miguel Rodriguez",
            "Backend Developer",
            "men/46",
            4.7,
            80,
            &["Python", "Django", "PostgreSQL", "Redis", "RabbitMQ"],
            85,
            WithinTwoWeeks,
            false,
        ),
        record(
            "4",
            "Priya Sharma",
            "DevOps Engineer",
            "women/65",
            4.9,
            110,
            &["Kubernetes", "Docker", "AWS", "Terraform", "CI/CD"],
            89,
            Immediate,
            true,
        ),
        record(
            "5",
            "David Wilson",
            "Mobile Developer",
            "men/22",
            4.6,
            75,
            &["React Native", "Swift", "Kotlin", "Firebase", "Redux"],
            82,
            WithinOneWeek,
            true,
        ),
        record(
            "6",
            "Emma Thompson",
            "UI/UX Designer & Developer",
            "women/29",
            4.8,
            90,
            &["Figma", "React", "CSS", "User Research", "Prototyping"],
            94,
            Immediate,
            true,
        ),
        record(
            "7",
            "Omar Hassan",
            "Machine Learning Engineer",
            "men/55",
            4.7,
            130,
            &["Python", "TensorFlow", "PyTorch", "Data Science", "NLP"],
            78,
            WithinAMonth,
            false,
        ),
        record(
            "8",
            "Lisa Wang",
            "Blockchain Developer",
            "women/79",
            4.5,
            120,
            &["Solidity", "Ethereum", "Web3.js", "Smart Contracts", "DeFi"],
            76,
            WithinTwoWeeks,
            true,
        ),
        record(
            "9",
            "James Smith",
            "System Architect",
            "men/41",
            4.9,
            140,
            &[
                "System Design",
                "Cloud Architecture",
                "AWS",
                "Microservices",
                "Serverless",
            ],
            90,
            WithinOneWeek,
            true,
        ),
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Detailed profile for the featured engineer. The profile page shows a longer skill list
/// than the search card.
pub(crate) fn featured_profile(mut record: TalentRecord) -> TalentProfile {
    for skill in ["JavaScript", "HTML5", "CSS3", "Redux", "Jest", "Cypress"] {
        record.skills.insert(skill);
    }

    TalentProfile {
        record,
        bio: "I'm a passionate frontend developer with 8+ years of experience building responsive, user-friendly web applications. I specialize in React ecosystem and modern JavaScript frameworks, with a strong focus on creating performant and accessible user interfaces. I enjoy solving complex problems and continuously learning new technologies.".to_string(),
        location: "San Francisco, CA".to_string(),
        experience_years: 8,
        languages: [("English", "Native"), ("Spanish", "Intermediate"), ("French", "Basic")]
            .into_iter()
            .map(|(name, level)| SpokenLanguage {
                name: name.to_string(),
                level: level.to_string(),
            })
            .collect(),
        education: vec![
            Education {
                degree: "M.S. Computer Science".to_string(),
                institution: "Stanford University".to_string(),
                year: 2015,
            },
            Education {
                degree: "B.S. Computer Science".to_string(),
                institution: "University of California, Berkeley".to_string(),
                year: 2013,
            },
        ],
        work_history: vec![
            WorkHistoryEntry {
                role: "Senior Frontend Developer".to_string(),
                company: "TechCorp Inc.".to_string(),
                duration: "2020 - Present".to_string(),
                description: "Lead frontend development for the company's flagship product. Implemented new features, improved performance, and mentored junior developers.".to_string(),
            },
            WorkHistoryEntry {
                role: "Frontend Developer".to_string(),
                company: "InnoSoft".to_string(),
                duration: "2017 - 2020".to_string(),
                description: "Developed responsive web applications using React and modern JavaScript. Collaborated with design and backend teams to deliver seamless user experiences.".to_string(),
            },
            WorkHistoryEntry {
                role: "Junior Web Developer".to_string(),
                company: "StartHub".to_string(),
                duration: "2015 - 2017".to_string(),
                description: "Built and maintained client websites. Implemented responsive designs and optimized site performance.".to_string(),
            },
        ],
        projects: vec![
            PortfolioProject {
                name: "E-commerce Platform".to_string(),
                description: "A full-featured e-commerce platform with advanced filtering, real-time inventory updates, and secure checkout.".to_string(),
                technologies: to_strings(&["React", "Next.js", "GraphQL", "Stripe"]),
                link: Some("https://example.com/ecommerce".to_string()),
            },
            PortfolioProject {
                name: "Analytics Dashboard".to_string(),
                description: "Interactive dashboard for visualizing business metrics with customizable charts and reports.".to_string(),
                technologies: to_strings(&["React", "D3.js", "TypeScript", "Material UI"]),
                link: Some("https://example.com/dashboard".to_string()),
            },
            PortfolioProject {
                name: "Project Management Tool".to_string(),
                description: "Collaborative project management application with real-time updates and task tracking.".to_string(),
                technologies: to_strings(&["React", "Firebase", "Redux", "TailwindCSS"]),
                link: None,
            },
        ],
        reviews: vec![
            ClientReview {
                name: "Sarah Miller".to_string(),
                rating: 5.0,
                comment: "Alex was exceptional to work with. He delivered the project ahead of schedule and the code quality was outstanding. Would definitely hire again!".to_string(),
                date: date(2023, 6, 15),
            },
            ClientReview {
                name: "David Chen".to_string(),
                rating: 5.0,
                comment: "Incredibly skilled developer who really understands how to create intuitive user interfaces. Communication was excellent throughout the project.".to_string(),
                date: date(2023, 3, 22),
            },
            ClientReview {
                name: "Emma Wilson".to_string(),
                rating: 4.0,
                comment: "Great work on our application redesign. Alex provided valuable insights and implemented all features we requested.".to_string(),
                date: date(2022, 11, 10),
            },
        ],
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

