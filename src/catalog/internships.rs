//! Internship listings and the skill profile assumed for each domain.

/// One internship opening.
#[derive(Debug)]
pub struct Internship {
    pub id: &'static str,
    pub company: &'static str,
    pub role: &'static str,
    pub location: &'static str,
    pub stipend: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub requirements: &'static [&'static str],
    pub skills: &'static [&'static str],
    pub apply_url: &'static str,
    /// Catalog domain the role belongs to.
    pub domain: &'static str,
}

pub fn internships() -> &'static [Internship] {
    INTERNSHIPS
}

pub fn find_internship(id: &str) -> Option<&'static Internship> {
    INTERNSHIPS.iter().find(|i| i.id == id)
}

/// Skills assumed for someone headed into `domain`; empty for domains
/// without a profile.
pub fn domain_skills(domain: &str) -> &'static [&'static str] {
    DOMAIN_SKILLS
        .iter()
        .find(|(d, _)| *d == domain)
        .map(|(_, skills)| *skills)
        .unwrap_or(&[])
}

const DOMAIN_SKILLS: &[(&str, &[&str])] = &[
    ("SDE", &["Java", "Python", "JavaScript", "React"]),
    (
        "Data Analyst",
        &["Python", "SQL", "Data Analysis", "Machine Learning"],
    ),
    ("Cybersecurity", &["Security", "Python", "Networking"]),
    ("Cloud", &["System Design", "Microservices", "Node.js", "Python"]),
    ("Tester", &["JavaScript", "API Integration", "Python"]),
    (
        "Product Manager",
        &["Product Strategy", "User Research", "Data Analysis", "SQL"],
    ),
];

const INTERNSHIPS: &[Internship] = &[
    Internship {
        id: "flipkart-swe",
        company: "Flipkart",
        role: "Software Engineering Intern",
        location: "Bengaluru, India | Hybrid",
        stipend: "₹40,000/month",
        duration: "6 months",
        description: "Work on India's largest e-commerce platform, building scalable solutions for millions of users.",
        requirements: &[
            "CS/IT background",
            "Strong programming skills",
            "Problem-solving abilities",
        ],
        skills: &["Java", "Python", "React", "Microservices"],
        apply_url: "https://www.flipkartcareers.com",
        domain: "SDE",
    },
    Internship {
        id: "zomato-product",
        company: "Zomato",
        role: "Product Management Intern",
        location: "Gurugram, India | Remote",
        stipend: "₹35,000/month",
        duration: "4 months",
        description: "Drive product strategy for India's leading food delivery platform and work with cross-functional teams.",
        requirements: &[
            "Business/Engineering background",
            "Analytical mindset",
            "User-centric thinking",
        ],
        skills: &["Product Strategy", "Data Analysis", "User Research", "SQL"],
        apply_url: "https://www.zomato.com/careers",
        domain: "Product Manager",
    },
    Internship {
        id: "paytm-data",
        company: "Paytm",
        role: "Data Science Intern",
        location: "Noida, India | Hybrid",
        stipend: "₹45,000/month",
        duration: "6 months",
        description: "Analyze financial data and build ML models to enhance India's digital payment ecosystem.",
        requirements: &[
            "Statistics/CS background",
            "Python proficiency",
            "ML knowledge",
        ],
        skills: &["Python", "SQL", "Machine Learning", "Financial Analytics"],
        apply_url: "https://jobs.paytm.com",
        domain: "Data Analyst",
    },
    Internship {
        id: "byju-frontend",
        company: "BYJU'S",
        role: "Frontend Development Intern",
        location: "Bengaluru, India | On-site",
        stipend: "₹30,000/month",
        duration: "5 months",
        description: "Build engaging educational interfaces for India's largest ed-tech platform serving millions of students.",
        requirements: &[
            "Web development skills",
            "React knowledge",
            "UI/UX understanding",
        ],
        skills: &["React", "JavaScript", "CSS", "UI Design"],
        apply_url: "https://byjus.com/careers",
        domain: "SDE",
    },
    Internship {
        id: "swiggy-mobile",
        company: "Swiggy",
        role: "Mobile App Development Intern",
        location: "Bengaluru, India | Hybrid",
        stipend: "₹38,000/month",
        duration: "4 months",
        description: "Develop mobile features for India's leading food delivery app used by millions daily.",
        requirements: &[
            "Mobile development experience",
            "React Native/Flutter",
            "API integration",
        ],
        skills: &["React Native", "JavaScript", "Mobile UI", "API Integration"],
        apply_url: "https://careers.swiggy.com",
        domain: "SDE",
    },
    Internship {
        id: "ola-backend",
        company: "Ola",
        role: "Backend Engineering Intern",
        location: "Bengaluru, India | On-site",
        stipend: "₹42,000/month",
        duration: "6 months",
        description: "Build scalable backend systems for India's mobility platform connecting millions of riders and drivers.",
        requirements: &[
            "Backend development skills",
            "Database knowledge",
            "System design basics",
        ],
        skills: &["Node.js", "Python", "MongoDB", "System Design"],
        apply_url: "https://www.olacabs.com/careers",
        domain: "Cloud",
    },
    Internship {
        id: "razorpay-fintech",
        company: "Razorpay",
        role: "Fintech Development Intern",
        location: "Bengaluru, India | Hybrid",
        stipend: "₹50,000/month",
        duration: "6 months",
        description: "Work on payment solutions and financial products powering India's digital economy.",
        requirements: &[
            "Strong programming skills",
            "Interest in fintech",
            "Security awareness",
        ],
        skills: &["Java", "Python", "Payment APIs", "Security"],
        apply_url: "https://razorpay.com/jobs",
        domain: "Cybersecurity",
    },
    Internship {
        id: "freshworks-saas",
        company: "Freshworks",
        role: "SaaS Development Intern",
        location: "Chennai, India | Remote",
        stipend: "₹35,000/month",
        duration: "5 months",
        description: "Contribute to customer experience software used by businesses across India and globally.",
        requirements: &[
            "Full-stack development",
            "SaaS understanding",
            "Customer-focused mindset",
        ],
        skills: &["Ruby on Rails", "JavaScript", "PostgreSQL", "SaaS"],
        apply_url: "https://www.freshworks.com/company/careers",
        domain: "SDE",
    },
];
