//! Static reference content: hospitals, emergency numbers, darshan FAQ.

use serde::Serialize;

/// Nearby medical facility.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Hospital {
    pub name: &'static str,
    pub phone: &'static str,
    pub location_link: &'static str,
}

/// Local service with a phone number.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct EmergencyContact {
    pub service: &'static str,
    pub phone: &'static str,
}

/// One question/answer pair about darshan procedure.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DarshanFaq {
    pub id: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

pub const HOSPITALS: &[Hospital] = &[
    Hospital {
        name: "Government General Hospital",
        phone: "08524-287333",
        location_link: "https://maps.app.goo.gl/abcdef123456",
    },
    Hospital {
        name: "Apollo Reach Hospital",
        phone: "1860-500-1066",
        location_link: "https://maps.app.goo.gl/ghijkl789012",
    },
    Hospital {
        name: "Devasthanam Hospital",
        phone: "08524-288222",
        location_link: "https://maps.app.goo.gl/mnopqr345678",
    },
];

pub const EMERGENCY_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        service: "Police Station, Srisailam",
        phone: "100 / 08524-287100",
    },
    EmergencyContact {
        service: "Ghat Road Security Post",
        phone: "9440796344",
    },
    EmergencyContact {
        service: "Temple Information Center",
        phone: "08524-288888",
    },
    EmergencyContact {
        service: "Central Reception Office",
        phone: "08524-288883",
    },
    EmergencyContact {
        service: "Fire Station",
        phone: "101",
    },
    EmergencyContact {
        service: "APSRTC Bus Station",
        phone: "08524-287236",
    },
];

/// Ghat road gate hours; the gates are closed at night.
pub const GHAT_ROAD_HOURS: &str = "6:00 AM to 9:00 PM";

pub const GHAT_ROAD_TIPS: &[&str] = &[
    "Drive slowly and carefully, especially at hairpin bends.",
    "Do not stop or get out of your vehicle inside the forest area.",
    "Watch for wildlife crossing the road.",
    "Overtaking is dangerous and should be avoided.",
];

pub const HEALTH_TIPS: &[&str] = &[
    "Carry a basic first-aid kit with bandages, antiseptic, pain relievers, and any personal medications.",
    "Stay hydrated by drinking plenty of water, especially during hot weather. Carry a reusable water bottle.",
    "Eat at clean and reputable places to avoid foodborne illnesses. Be cautious with street food.",
    "Beware of monkeys. Do not feed them and keep your belongings secure. They are known to snatch bags and food items.",
];

pub const DARSHAN_BOOKING_URL: &str = "https://www.srisailadevasthanam.org/en-in/online-booking";

pub const DARSHAN_FAQ: &[DarshanFaq] = &[
    DarshanFaq {
        id: "darshan-types",
        question: "What are the different types of darshan available?",
        answer: "Srisailam temple offers several types of darshan. The main ones are: Sarva Darshan (free entry for all), Seeghra Darshan (a paid option for a quicker darshan), and Sparsha Darshan (which allows devotees to touch the main Jyotirlingam, available only during specific, limited hours). It is highly recommended to check the official Devasthanam website for the most current timings and availability before your visit.",
    },
    DarshanFaq {
        id: "dress-code",
        question: "Is there a mandatory dress code for the temple?",
        answer: "Yes, a strict traditional dress code is enforced. Men are required to wear a Dhoti or Lungi (with an upper cloth) or Kurta-Pajama. Women must wear a Saree, Salwar Kameez with a Chunni, or a traditional half-saree. Western attire such as jeans, shorts, t-shirts, and skirts are not permitted inside the temple premises.",
    },
    DarshanFaq {
        id: "id-proof",
        question: "What form of ID is required for darshan and other services?",
        answer: "An original government-issued photo ID is mandatory for all devotees, especially for Sparsha Darshan and accommodation booking. The Aadhaar card is the most widely accepted form of identification. Ensure you carry the physical original card, as digital copies or photocopies may not be accepted.",
    },
    DarshanFaq {
        id: "mobile-policy",
        question: "Are mobile phones and cameras allowed inside the temple?",
        answer: "No, mobile phones, cameras, and other electronic gadgets are strictly prohibited inside the main temple complex. You must deposit them at the designated counters available near the temple entrance before you proceed for darshan. It's advisable to leave non-essential electronics at your accommodation.",
    },
    DarshanFaq {
        id: "temple-timings",
        question: "What are the general temple opening and closing times?",
        answer: "The temple is generally open from 4:30 AM to 10:00 PM. However, darshan timings, poojas, and rituals have specific schedules throughout the day. These timings can also change during festivals and special occasions. Please check the official website for the daily schedule.",
    },
    DarshanFaq {
        id: "history",
        question: "What is the history and significance of the temple?",
        answer: "Sri Mallikarjuna Swamy Temple, located at Srisailam, is one of the twelve Jyotirlingas of Lord Shiva and also one of the eighteen Shakti Peethas of Goddess Parvati. The presiding deities are Mallikarjuna Swamy (a form of Shiva) and Bhramaramba Devi (a form of Parvati), making it a unique site revered by both Shaivites and Shaktas.",
    },
];

/// Looks up a FAQ entry by id, or by a case-insensitive keyword in its
/// question.
pub fn find_faq(query: &str) -> Option<&'static DarshanFaq> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    DARSHAN_FAQ
        .iter()
        .find(|faq| faq.id == query)
        .or_else(|| {
            DARSHAN_FAQ
                .iter()
                .find(|faq| faq.question.to_lowercase().contains(&query))
        })
}
