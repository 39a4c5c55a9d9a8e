use organix_core::{Query, Resolution};

/// Inputs of the advice prompt, borrowed from the query and its resolution
#[derive(Debug, Clone)]
pub struct AdvicePrompt<'a> {
    pub chemical: &'a str,
    pub crop: &'a str,
    pub acres: f64,
    pub problem_or_pest: &'a str,
    pub organic_alternative: &'a str,
    pub dosage: String,
    pub application_time: &'a str,
}

impl<'a> AdvicePrompt<'a> {
    pub fn new(query: &'a Query, resolution: &'a Resolution<'a>) -> Self {
        Self {
            chemical: query.chemical(),
            crop: query.crop(),
            acres: query.acres(),
            problem_or_pest: &resolution.record.problem_or_pest,
            organic_alternative: &resolution.record.organic_alternative,
            dosage: resolution.dosage.render(),
            application_time: &resolution.record.application_time,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Act as a friendly agricultural expert.\n\
             A farmer uses {chemical} on {crop} for {problem}.\n\
             The organic alternative is {alternative}.\n\
             \n\
             - Explain why it is cheaper for the farmer.\n\
             - Step 1: How to apply it for {acres} acres ({dosage}).\n\
             - Step 2: Remind them to apply during {window}.\n\
             - Explain why {alternative} is better for soil.\n\
             \n\
             Provide the response ONLY in bullet points using '-' followed by a space.\n\
             Do not use bold or headers.\n",
            chemical = self.chemical,
            crop = self.crop,
            problem = self.problem_or_pest,
            alternative = self.organic_alternative,
            dosage = self.dosage,
            acres = self.acres,
            window = self.application_time,
        )
    }
}
