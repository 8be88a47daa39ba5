//! Page texts for the built-in United Arab Emirates topics.

pub(super) const CULTURE: &[&str] = &[
    "The culture of the UAE is a rich blend of Arabian, Islamic, and Persian influences, with strong traditions of hospitality, family, and respect. It's a society that values both its deep-rooted heritage and its modern, cosmopolitan outlook.",
    "Key Aspects of Emirati Culture:\n\n• Family and Community:\nFamily is central to Emirati life, and strong social bonds are maintained through frequent gatherings and celebrations.\n\n• Hospitality:\nEmiratis are known for their generosity, often offering guests Arabic coffee (gahwa) and dates.",
    "• Respect:\nRespect for elders and authority figures is deeply ingrained in the culture.\n\n• Islamic Values:\nIslam is the predominant religion, influencing architecture, attire, and customs.",
    "• Traditional Arts and Crafts:\nEmirati culture features vibrant calligraphy, henna, weaving (Sadu), and perfumery.\n\n• Traditional Sports:\nFalconry, camel racing, and dhow racing remain key cultural practices.",
];

pub(super) const CURRENCY: &[&str] = &[
    "The official currency of the United Arab Emirates is the United Arab Emirates Dirham (AED). It is issued and regulated by the Central Bank of the UAE.",
    "Subdivision: 1 dirham = 100 fils.\n\nCoins: Commonly used coins include 1, 5, 10, 25, and 50 fils, as well as a 1 dirham coin.\n\nBanknotes: Denominations available are 5, 10, 20, 50, 100, 200, 500, and 1000 dirhams.",
    "The UAE Dirham (AED) is pegged to the US Dollar, which helps maintain its stability against other currencies.\n\nCurrently, 1 Dirham is approximately equal to 23.60 Indian Rupees (INR). This stable rate benefits trade and remittances between the UAE and India, two countries with strong economic ties.",
    "The UAE Dirham banknotes feature iconic landmarks and cultural symbols that reflect the nation's heritage.\n\nImages include the Burj Khalifa, showcasing Dubai's architectural marvel, and the traditional dhow boats representing the country's maritime history.\n\nThese visuals celebrate the blend of modernity and tradition that defines the UAE's identity.",
];

pub(super) const EMERGENCY: &[&str] = &[
    "The UAE has a unified emergency number (112) that connects you to police, ambulance, and fire services.\n\nEmergency services in the UAE offer multilingual support to assist residents and visitors.",
    "Police, ambulance, and fire departments have dedicated direct numbers for faster assistance.\n\nIt is important to know the emergency numbers and keep them handy for quick response in critical situations.",
    "Police: 999 — For all law enforcement emergencies.\n\nAmbulance: 998 — For urgent medical assistance.\n\nFire Department: 997 — For fire emergencies and rescue.",
    "Coast Guard: 996 — For maritime emergencies.\n\nCivil Defence: 997 — Handles various civil emergencies including fires and disasters.\n\nTraffic Accidents: 901 — For reporting road accidents.",
];

pub(super) const TRAVEL: &[&str] = &[
    "- For Tourists / Short-Term Visitors:\n1. Valid Passport:\nMust be valid for at least 6 months from the date of entry.\n\n2. Visa Requirement:\nVisa on Arrival / Visa-Free for certain nationalities.\nPre-arranged Tourist Visa required for others (apply via embassy, airline, or UAE travel portals).\n\n3. Return/Onward Ticket:\nProof of departure is required to ensure you do not overstay.",
    "4. Accommodation Details:\nHotel booking confirmation or an invitation letter from a UAE resident.\n\n5. Sufficient Funds:\nEvidence of the ability to support yourself during your stay (bank statements or credit cards).\n\n6. Travel Insurance:\nHighly recommended, especially for medical coverage.\n\n7. Health Rules:\nRequirements like vaccination proof may apply depending on the latest UAE travel guidelines.",
    "- For Long-Term Stay / Residency (Work, Study, Family):\n1. Valid Passport:\nAt least 6 months validity required for processing residence permits.\n\n2. Entry Permit / Residency Visa:\nRequired for jobs, business, study, or family reunification.\nOften sponsored by an employer, educational institution, or family member.\n\n3. Medical Fitness Test:\nMandatory health check-up as part of residence visa processing.",
    "4. Emirates ID Registration:\nCompulsory for residents; serves as your official identification card.\n\n5. Accommodation / Tenancy Contract:\nProof of legal housing arrangement (rent contract or company-provided housing).\n\n6. Health Insurance:\nProof of valid UAE-compliant health coverage is mandatory for residence visa holders in most Emirates.\n\n7. Financial Proof (if investing or self-sponsoring):\nMust demonstrate sufficient financial resources or investment in the UAE.",
];

/// "<arabic>\n<english>\n<pronunciation>"
pub(super) const GREETINGS: &[&str] = &[
    "السلام عليكم\nPeace be upon you\nSalam Alaikum",
    "صباح الخير\nGood morning\nSabah alkhayr",
    "مساء الخير\nGood evening\nMasa alkhayr",
    "مرحبا\nHello\nMarhaban",
    "كيف الحال؟\nHow are you?\nKayfa alhaal",
    "أنا بخير\nI am fine\nAna bekhayr",
    "شكرًا\nThank you\nShukran",
    "عفوًا\nYou're welcome\nAfwan",
    "نعم\nYes\nNa'am",
    "لا\nNo\nLa",
    "مع السلامة\nGoodbye\nMa'a as-salama",
    "تصبح على خير\nGood night\nTusbih 'ala khayr",
    "من فضلك\nPlease\nMin fadlik",
    "آسف\nSorry\nAasif",
    "ما اسمك؟\nWhat is your name?\nMa ismuk?",
];
