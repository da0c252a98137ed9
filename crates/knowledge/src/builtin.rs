//! Built-in knowledge documents.
//!
//! `fallback_document` is the last loader strategy: a minimal set that keeps
//! greetings and the fallback template working when no data file exists.
//! `sample_document` is the full curated default used by tests and by
//! deployments that have not run the data pipeline.

use admitdesk_core::knowledge::{
    Category, FaqEntry, KnowledgeDocument, QuickResponse, QuickResponseTable,
};
use serde_json::json;

pub const DEFAULT_GREETING: &str =
    "Hello! Welcome to the MMMUT Admission Help Desk. How can I assist you today?";

pub const DEFAULT_FALLBACK: &str = "I'm sorry, I don't have specific information about that. \
     Could you please ask about courses, eligibility, fees, or other admission-related topics?";

const DEGRADED_FALLBACK: &str = "I'm sorry, I'm experiencing some technical difficulties. \
     Please try again later or contact the admission office directly.";

/// Minimal knowledge set for when no data file is available at all.
pub fn fallback_document() -> KnowledgeDocument {
    let mut quick_responses = QuickResponseTable::new();
    quick_responses.insert(QuickResponseTable::GREETING, DEFAULT_GREETING.into());
    quick_responses.insert(QuickResponseTable::FALLBACK, DEGRADED_FALLBACK.into());

    KnowledgeDocument {
        categories: vec![
            Category::new(
                "university",
                json!({
                    "name": "Madan Mohan Malaviya University of Technology",
                    "location": "Gorakhpur, Uttar Pradesh"
                }),
            )
            .with_title("About MMMUT"),
        ],
        faq: Vec::new(),
        quick_responses,
    }
}

/// The full curated default document.
pub fn sample_document() -> KnowledgeDocument {
    let categories = vec![
        Category::new(
            "university",
            json!({
                "full_name": "Madan Mohan Malaviya University of Technology",
                "short_name": "MMMUT",
                "location": "Gorakhpur, Uttar Pradesh",
                "established": "1962",
                "type": "Government University",
                "accreditation": "NAAC Accredited",
                "recognition": "UGC Recognized"
            }),
        )
        .with_title("About MMMUT")
        .with_keywords(["university", "about", "mmmut", "gorakhpur", "established", "government"]),
        Category::new(
            "courses",
            json!({
                "undergraduate": {
                    "engineering": [
                        "Computer Science Engineering",
                        "Information Technology",
                        "Electronics and Communication Engineering",
                        "Electrical Engineering",
                        "Mechanical Engineering",
                        "Civil Engineering",
                        "Chemical Engineering",
                        "Biotechnology"
                    ]
                }
            }),
        )
        .with_title("Courses Offered")
        .with_keywords([
            "courses",
            "programs",
            "btech",
            "engineering",
            "computer science",
            "mechanical",
            "civil",
            "electrical",
        ]),
        Category::new(
            "admission",
            json!({
                "steps": [
                    "Qualify JEE Main",
                    "Register for counselling",
                    "Fill choices and lock them",
                    "Document verification",
                    "Fee payment and seat confirmation"
                ]
            }),
        )
        .with_title("Admission Process")
        .with_keywords(["admission", "process", "procedure", "apply", "application", "form", "steps"]),
        Category::new(
            "eligibility",
            json!({
                "btech": {
                    "qualification": "10+2 with Physics, Chemistry and Mathematics",
                    "minimum_marks": "75%",
                    "entrance": "JEE Main"
                }
            }),
        )
        .with_title("Eligibility Criteria")
        .with_keywords([
            "eligibility",
            "criteria",
            "qualification",
            "marks",
            "percentage",
            "requirements",
            "10+2",
        ]),
        Category::new(
            "fees",
            json!({
                "annual_fee": "Approximately 100000 INR including tuition and hostel",
                "scholarships": "Available for meritorious students"
            }),
        )
        .with_title("Fee Structure")
        .with_keywords(["fees", "cost", "payment", "tuition", "hostel", "scholarship", "money"]),
        Category::new(
            "important_dates",
            json!({
                "application_start": "March",
                "application_end": "April",
                "counselling": "June-July"
            }),
        )
        .with_title("Important Dates")
        .with_keywords(["dates", "deadline", "schedule", "timeline", "when", "last date", "exam date"]),
        Category::new(
            "facilities",
            json!({
                "campus": ["Central library", "Computer labs", "Sports complex", "WiFi campus"],
                "hostels": "Separate hostels for boys and girls with mess facilities"
            }),
        )
        .with_title("Campus Facilities")
        .with_keywords(["facilities", "infrastructure", "hostel", "library", "lab", "sports", "wifi"]),
        Category::new(
            "placement",
            json!({
                "placement_rate": "85%+",
                "average_package": "6.5 LPA",
                "recruiters": "Top companies recruit from campus"
            }),
        )
        .with_title("Placements")
        .with_keywords(["placement", "job", "career", "salary", "package", "companies", "recruitment"]),
        Category::new(
            "contact",
            json!({
                "phone": "+91-551-2273958",
                "email": "admission@mmmut.ac.in",
                "address": "MMMUT, Gorakhpur, Uttar Pradesh 273010"
            }),
        )
        .with_title("Contact")
        .with_keywords(["contact", "phone", "email", "address", "office", "help", "support"]),
    ];

    let faq = vec![
        FaqEntry {
            question: "What is the eligibility criteria for B.Tech admission?".into(),
            answer: "Candidates must have passed 10+2 with Physics, Chemistry, and Mathematics \
                     with minimum 75% marks and qualify JEE Main."
                .into(),
            category: "eligibility".into(),
        },
        FaqEntry {
            question: "What is the fee structure for B.Tech?".into(),
            answer: "The annual fee is approximately 100000 INR including tuition, hostel, and \
                     other charges."
                .into(),
            category: "fees".into(),
        },
        FaqEntry {
            question: "When do applications start?".into(),
            answer: "Applications typically start in March and end in April. Check the official \
                     website for exact dates."
                .into(),
            category: "important_dates".into(),
        },
        FaqEntry {
            question: "What courses are offered?".into(),
            answer: "MMMUT offers B.Tech in CSE, IT, ECE, EE, ME, CE, Chemical Engineering, and \
                     Biotechnology."
                .into(),
            category: "courses".into(),
        },
        FaqEntry {
            question: "Is hostel facility available?".into(),
            answer: "Yes, separate hostels are available for boys and girls with mess facilities."
                .into(),
            category: "facilities".into(),
        },
        FaqEntry {
            question: "What is the placement record?".into(),
            answer: "MMMUT has an excellent placement record with 85%+ placement rate and an \
                     average package of 6.5 LPA."
                .into(),
            category: "placement".into(),
        },
        FaqEntry {
            question: "How to contact admission office?".into(),
            answer: "You can contact at +91-551-2273958 or email admission@mmmut.ac.in".into(),
            category: "contact".into(),
        },
    ];

    let mut quick_responses = QuickResponseTable::new();
    quick_responses.insert(
        QuickResponseTable::GREETING,
        QuickResponse::Variants(vec![
            DEFAULT_GREETING.into(),
            "Hi there! I'm here to help with your MMMUT admission queries. What would you like \
             to know?"
                .into(),
            "Welcome! I can help you with information about MMMUT admissions. What's your \
             question?"
                .into(),
        ]),
    );
    quick_responses.insert(
        "courses",
        "MMMUT offers B.Tech programs in Computer Science, IT, Electronics, Electrical, \
         Mechanical, Civil, Chemical Engineering, and Biotechnology."
            .into(),
    );
    quick_responses.insert(
        "eligibility",
        "For B.Tech admission, you need 10+2 with PCM and 75% marks, plus qualify JEE Main.".into(),
    );
    quick_responses.insert(
        "fees",
        "The annual fee is approximately 100000 INR including all charges. Scholarships are \
         available for meritorious students."
            .into(),
    );
    quick_responses.insert(
        "important_dates",
        "Applications typically open in March. Please check our website for current dates and \
         deadlines."
            .into(),
    );
    quick_responses.insert(
        "contact",
        "Contact admission office: Phone: +91-551-2273958, Email: admission@mmmut.ac.in".into(),
    );
    quick_responses.insert(
        "facilities",
        "MMMUT has excellent facilities including library, labs, hostels, sports complex, and \
         WiFi campus."
            .into(),
    );
    quick_responses.insert(
        "placement",
        "MMMUT has 85%+ placement rate with average package of 6.5 LPA. Top companies recruit \
         from campus."
            .into(),
    );
    quick_responses.insert(QuickResponseTable::FALLBACK, DEFAULT_FALLBACK.into());

    KnowledgeDocument {
        categories,
        faq,
        quick_responses,
    }
}
